use std::path::PathBuf;

use clap::Parser;
use gnsync_core::ContentFormat;

#[derive(Parser, Debug)]
#[command(name = "gnsync")]
#[command(about = "Push a directory of text files into a note store")]
#[command(version)]
pub struct Cli {
    /// Directory to synchronize
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Glob mask of files to sync (defaults to config, then "*.*")
    #[arg(short, long)]
    pub mask: Option<String>,

    /// Content format of the files (defaults to config, then plain)
    #[arg(short, long, value_enum)]
    pub format: Option<ContentFormat>,

    /// Target notebook (defaults to the directory name)
    #[arg(short, long)]
    pub notebook: Option<String>,

    /// Log file (defaults to config, then the state directory)
    #[arg(short, long)]
    pub logpath: Option<PathBuf>,

    /// Fail a file whose title was already created earlier in the run
    #[arg(long)]
    pub strict_titles: bool,

    /// Config file to use instead of ~/.config/gnsync/config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a commented config template and exit
    #[arg(long)]
    pub init_config: bool,
}
