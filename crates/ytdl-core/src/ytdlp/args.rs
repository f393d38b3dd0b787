//! Argument vectors for yt-dlp.

use crate::config::YtdlConfig;
use crate::format::FormatChoice;
use crate::progress;
use std::path::{Path, PathBuf};

/// How a target is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// One video; playlist parameters in the URL are ignored.
    Single,
    /// A text file of video URLs, downloaded one after another.
    List,
    /// Every video of a playlist, saved under a folder named after it.
    Playlist,
}

/// Output template: `<dir>/%(title)s.%(ext)s`, or a per-playlist folder in playlist mode.
fn output_template(mode: DownloadMode, dir: &Path) -> PathBuf {
    match mode {
        DownloadMode::Playlist => dir.join("%(playlist_title)s").join("%(title)s.%(ext)s"),
        DownloadMode::Single | DownloadMode::List => dir.join("%(title)s.%(ext)s"),
    }
}

/// Full argument list for downloading `url` (the URL is last).
pub fn download_args(
    cfg: &YtdlConfig,
    mode: DownloadMode,
    format: &FormatChoice,
    out_dir: &Path,
    url: &str,
) -> Vec<String> {
    let mut args = vec![
        "--newline".to_string(),
        "--progress".to_string(),
        "--no-simulate".to_string(),
        "--socket-timeout".to_string(),
        cfg.socket_timeout_secs.to_string(),
        "-o".to_string(),
        output_template(mode, out_dir).to_string_lossy().into_owned(),
        "--progress-template".to_string(),
        progress::progress_template(),
        "--print".to_string(),
        progress::title_template(),
        "--print".to_string(),
        progress::file_template(),
    ];
    match mode {
        DownloadMode::Playlist => {
            args.push("--yes-playlist".to_string());
            args.push("--print".to_string());
            args.push(progress::item_template());
        }
        DownloadMode::Single | DownloadMode::List => args.push("--no-playlist".to_string()),
    }
    if let Some(ffmpeg) = &cfg.ffmpeg_bin {
        args.push("--ffmpeg-location".to_string());
        args.push(ffmpeg.to_string_lossy().into_owned());
    }
    args.extend(format.ytdlp_args(cfg));
    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// Arguments for dumping a single video's metadata as JSON.
pub fn info_args(cfg: &YtdlConfig, url: &str) -> Vec<String> {
    vec![
        "-J".to_string(),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        "--socket-timeout".to_string(),
        cfg.socket_timeout_secs.to_string(),
        "--".to_string(),
        url.to_string(),
    ]
}
