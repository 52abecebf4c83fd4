use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gnsync_config::{GlobalConfig, paths};
use gnsync_core::SyncError;
use gnsync_engine::{SyncReport, SyncRequest, converter_for, resolve_sync_dir, sync_directory};
use gnsync_lock::acquire_dir_lock;
use gnsync_store::HttpNoteStore;

mod cli;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = GlobalConfig::save_default_template()?;
        println!("Wrote config template to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => GlobalConfig::load_from(path)?,
        None => GlobalConfig::load()?,
    };

    let log_path = cli.logpath.clone().unwrap_or_else(|| config.log_path());
    // Held until main returns so buffered log lines are flushed.
    let _log_guard = logging::init(&log_path)?;

    match run(&cli, &config).await {
        Ok(report) => {
            println!("{}", report.summary());
            if report.has_failures() {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("Error: {err:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: &Cli, config: &GlobalConfig) -> Result<SyncReport> {
    let token = config.token().ok_or(SyncError::MissingAuth)?;
    let dir = resolve_sync_dir(cli.path.as_deref())?;

    let lock_root = paths::runtime_dir();
    let _lock = acquire_dir_lock(&lock_root, &dir)?;

    let store = HttpNoteStore::new(
        config.api.base_url.as_str(),
        token,
        Duration::from_secs(config.api.timeout_secs),
    )
    .context("Failed to build note store client")?;

    let format = cli.format.unwrap_or(config.sync.default_format);
    let converter = converter_for(format);
    let request = SyncRequest {
        dir: Some(dir),
        mask: cli
            .mask
            .clone()
            .unwrap_or_else(|| config.sync.default_mask.clone()),
        notebook: cli.notebook.clone(),
        strict_titles: cli.strict_titles,
    };
    tracing::debug!(?request, %format, "starting sync");

    sync_directory(&store, converter.as_ref(), &request, |file| {
        println!("{}", file.status_line());
    })
    .await
}
