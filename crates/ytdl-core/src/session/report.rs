//! Results of a download run.

use crate::progress::ProgressEvent;
use std::path::PathBuf;

/// Everything a session reports while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Human-readable status line (e.g. "Downloading video 2/5: ...").
    Status(String),
    /// Parsed yt-dlp output.
    Ytdlp(ProgressEvent),
    /// One URL of a batch failed; the batch continues.
    ItemFailed { url: String, error: String },
}

/// Result for one URL (or one playlist URL).
#[derive(Debug, Clone, Default)]
pub struct DownloadOutcome {
    pub url: String,
    pub titles: Vec<String>,
    pub files: Vec<PathBuf>,
    /// Set when this URL failed inside a batch.
    pub error: Option<String>,
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-URL results of a list download.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Number of valid URLs found in the file.
    pub total: usize,
    pub outcomes: Vec<DownloadOutcome>,
    /// The batch was stopped before every URL was attempted.
    pub stopped: bool,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True only if every URL was attempted and all of them succeeded.
    pub fn is_success(&self) -> bool {
        !self.stopped && self.outcomes.len() == self.total && self.failed() == 0
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().flat_map(|o| o.files.iter())
    }
}
