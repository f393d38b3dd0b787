//! yt-dlp invocation.
//!
//! yt-dlp does the actual work (extraction, stream selection, fragment
//! downloads) and calls ffmpeg to merge or convert. This module builds its
//! arguments, runs it, and turns its output into [`ProgressEvent`]s.
//!
//! [`ProgressEvent`]: crate::progress::ProgressEvent

mod args;
mod run;

pub use args::{download_args, info_args, DownloadMode};
pub use run::RunOutput;

use crate::config::YtdlConfig;
use crate::error::YtdlResult;
use crate::format::VideoInfo;
use std::path::PathBuf;

/// Handle to a yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlp {
    bin: PathBuf,
}

impl YtDlp {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn from_config(cfg: &YtdlConfig) -> Self {
        Self::new(cfg.ytdlp_bin.clone())
    }

    /// Fetches metadata (title, available formats) for one video without downloading it.
    pub async fn fetch_video_info(&self, cfg: &YtdlConfig, url: &str) -> YtdlResult<VideoInfo> {
        let json = self.capture(&info_args(cfg, url)).await?;
        let info: VideoInfo = serde_json::from_str(&json)?;
        tracing::debug!(
            title = info.title.as_deref().unwrap_or("?"),
            formats = info.formats.len(),
            "fetched video info"
        );
        Ok(info)
    }
}
