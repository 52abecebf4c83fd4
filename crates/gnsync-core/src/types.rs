use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How file bodies are rendered before they are pushed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Plain,
    Markdown,
}

impl ContentFormat {
    /// Returns the CLI-facing name for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Markdown => "markdown",
        }
    }
}

impl std::fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "markdown" => Ok(Self::Markdown),
            other => Err(format!(
                "Invalid content format '{other}'. Valid values: plain, markdown"
            )),
        }
    }
}

/// Outcome of one file in a sync run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileStatus {
    /// Not dirty since the last push.
    Skipped,
    /// A new remote note was created.
    Created,
    /// The matched remote note was overwritten.
    Updated,
    /// Matched a remote note that is at least as new as the file.
    UpToDate,
    /// The file pipeline failed; the message names the cause.
    Failed(String),
}

impl FileStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped"),
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::UpToDate => write!(f, "up to date"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}
