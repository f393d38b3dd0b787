//! Error type for the download path.

use std::path::PathBuf;

/// Errors surfaced by validation, environment checks and yt-dlp runs.
#[derive(Debug, thiserror::Error)]
pub enum YtdlError {
    #[error("not a valid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("URL file not found: {}", .0.display())]
    UrlFileNotFound(PathBuf),

    #[error("permission denied reading URL file: {}", .0.display())]
    UrlFilePermission(PathBuf),

    #[error("URL file is not valid UTF-8: {}", .0.display())]
    UrlFileEncoding(PathBuf),

    #[error("reading URL file {}: {source}", .path.display())]
    UrlFileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no valid YouTube URLs found in {}", .0.display())]
    NoValidUrls(PathBuf),

    #[error("save location is not an existing directory: {}", .0.display())]
    InvalidSaveLocation(PathBuf),

    #[error("{tool} is not installed or not on PATH")]
    ToolMissing { tool: &'static str },

    #[error("no internet connection detected ({addr}): {reason}")]
    NoNetwork { addr: String, reason: String },

    #[error("failed to start {}: {source}", .bin.display())]
    Spawn {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("yt-dlp failed ({}): {message}", describe_exit(.exit_code))]
    DownloadFailed {
        exit_code: Option<i32>,
        message: String,
        /// Files yt-dlp finished before failing (skipped playlist items leave the rest intact).
        saved: Vec<PathBuf>,
    },

    #[error("download stopped by user")]
    Stopped,

    #[error("malformed yt-dlp metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "killed by signal".to_string(),
    }
}

impl YtdlError {
    /// True when the failure came from a user stop request rather than the download itself.
    pub fn is_stopped(&self) -> bool {
        matches!(self, YtdlError::Stopped)
    }

    /// Files that were saved before a download failed; empty for every other error.
    pub fn saved_files(&self) -> &[PathBuf] {
        match self {
            YtdlError::DownloadFailed { saved, .. } => saved,
            _ => &[],
        }
    }
}

pub type YtdlResult<T> = Result<T, YtdlError>;
