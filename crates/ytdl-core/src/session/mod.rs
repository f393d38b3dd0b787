//! The three download modes: single video, URL list, playlist.
//!
//! Each mode validates its input, runs the preflight checks (save location,
//! tools, network) and then drives yt-dlp. Downloads run strictly one at a
//! time.

mod report;

pub use report::{BatchReport, DownloadOutcome, SessionEvent};

use crate::config::YtdlConfig;
use crate::control::StopSignal;
use crate::error::{YtdlError, YtdlResult};
use crate::format::FormatChoice;
use crate::preflight;
use crate::url_model::{is_youtube_url, read_url_file};
use crate::ytdlp::{download_args, DownloadMode, YtDlp};
use std::path::Path;
use std::sync::Arc;

/// Download context for one invocation.
pub struct Session {
    cfg: YtdlConfig,
    stop: Arc<StopSignal>,
}

impl Session {
    pub fn new(cfg: YtdlConfig, stop: Arc<StopSignal>) -> Self {
        Self { cfg, stop }
    }

    /// Save location must exist; tools must be installed; network must be up.
    async fn prepare(&self, out_dir: &Path) -> YtdlResult<YtDlp> {
        if !out_dir.is_dir() {
            return Err(YtdlError::InvalidSaveLocation(out_dir.to_path_buf()));
        }
        let tools = preflight::check_tools(&self.cfg)?;
        preflight::check_network(&self.cfg).await?;
        Ok(YtDlp::new(tools.ytdlp))
    }

    async fn fetch<F>(
        &self,
        ytdlp: &YtDlp,
        mode: DownloadMode,
        format: &FormatChoice,
        out_dir: &Path,
        url: &str,
        on_event: &mut F,
    ) -> YtdlResult<DownloadOutcome>
    where
        F: FnMut(SessionEvent),
    {
        let args = download_args(&self.cfg, mode, format, out_dir, url);
        let output = ytdlp
            .run(&args, &self.stop, |ev| on_event(SessionEvent::Ytdlp(ev.clone())))
            .await?;
        Ok(DownloadOutcome {
            url: url.to_string(),
            titles: output.titles,
            files: output.files,
            error: None,
        })
    }

    /// Downloads one video in the requested format.
    pub async fn download_single<F>(
        &self,
        url: &str,
        format: &FormatChoice,
        out_dir: &Path,
        mut on_event: F,
    ) -> YtdlResult<DownloadOutcome>
    where
        F: FnMut(SessionEvent),
    {
        let url = url.trim();
        if !is_youtube_url(url) {
            return Err(YtdlError::InvalidUrl(url.to_string()));
        }
        let ytdlp = self.prepare(out_dir).await?;
        tracing::info!(url, format = %format, dir = %out_dir.display(), "single download");
        on_event(SessionEvent::Status(format!(
            "Downloading {}...",
            format.describe()
        )));
        self.fetch(
            &ytdlp,
            DownloadMode::Single,
            format,
            out_dir,
            url,
            &mut on_event,
        )
        .await
    }

    /// Downloads every valid URL in `file`, one after another, in best quality.
    ///
    /// A failing URL is recorded and the batch moves on. A stop request ends
    /// the batch; the partial report is still returned.
    pub async fn download_list<F>(
        &self,
        file: &Path,
        out_dir: &Path,
        mut on_event: F,
    ) -> YtdlResult<BatchReport>
    where
        F: FnMut(SessionEvent),
    {
        on_event(SessionEvent::Status(format!(
            "Reading URL file: {}",
            file.display()
        )));
        let urls = read_url_file(file)?;
        if urls.is_empty() {
            return Err(YtdlError::NoValidUrls(file.to_path_buf()));
        }
        let ytdlp = self.prepare(out_dir).await?;
        tracing::info!(file = %file.display(), count = urls.len(), "list download");
        on_event(SessionEvent::Status(format!(
            "Found {} URLs in the file. Starting batch download...",
            urls.len()
        )));

        let mut report = BatchReport {
            total: urls.len(),
            ..BatchReport::default()
        };
        for (i, url) in urls.iter().enumerate() {
            if self.stop.is_stopped() {
                report.stopped = true;
                break;
            }
            on_event(SessionEvent::Status(format!(
                "Downloading video {}/{}: {}",
                i + 1,
                urls.len(),
                url
            )));
            match self
                .fetch(
                    &ytdlp,
                    DownloadMode::List,
                    &FormatChoice::Best,
                    out_dir,
                    url,
                    &mut on_event,
                )
                .await
            {
                Ok(outcome) => report.outcomes.push(outcome),
                Err(YtdlError::Stopped) => {
                    report.stopped = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!(url = %url, "download failed: {}", e);
                    on_event(SessionEvent::ItemFailed {
                        url: url.clone(),
                        error: e.to_string(),
                    });
                    report.outcomes.push(DownloadOutcome {
                        url: url.clone(),
                        files: e.saved_files().to_vec(),
                        error: Some(e.to_string()),
                        ..DownloadOutcome::default()
                    });
                }
            }
        }
        tracing::info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            stopped = report.stopped,
            "list download finished"
        );
        Ok(report)
    }

    /// Downloads a whole playlist in best quality into `<out_dir>/<playlist title>/`.
    pub async fn download_playlist<F>(
        &self,
        url: &str,
        out_dir: &Path,
        mut on_event: F,
    ) -> YtdlResult<DownloadOutcome>
    where
        F: FnMut(SessionEvent),
    {
        let url = url.trim();
        if !is_youtube_url(url) {
            return Err(YtdlError::InvalidUrl(url.to_string()));
        }
        let ytdlp = self.prepare(out_dir).await?;
        tracing::info!(url, dir = %out_dir.display(), "playlist download");
        on_event(SessionEvent::Status(format!(
            "Starting playlist download: {url}"
        )));
        self.fetch(
            &ytdlp,
            DownloadMode::Playlist,
            &FormatChoice::Best,
            out_dir,
            url,
            &mut on_event,
        )
        .await
    }
}
