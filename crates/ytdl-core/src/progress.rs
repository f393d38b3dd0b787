//! Parsing yt-dlp's stdout into progress events.
//!
//! yt-dlp is started with tagged `--progress-template` and `--print`
//! templates (see [`crate::ytdlp`]), so every line we care about starts with
//! one of the tags below. Anything else is passed through as a message.

use std::fmt;
use std::path::PathBuf;

pub(crate) const PROGRESS_TAG: &str = "[ytdl:progress]";
pub(crate) const TITLE_TAG: &str = "[ytdl:title]";
pub(crate) const ITEM_TAG: &str = "[ytdl:item]";
pub(crate) const FILE_TAG: &str = "[ytdl:file]";

/// `--progress-template` value: percent, speed and ETA separated by `|`.
pub(crate) fn progress_template() -> String {
    format!(
        "download:{PROGRESS_TAG} %(progress._percent_str)s|%(progress._speed_str)s|%(progress._eta_str)s"
    )
}

/// `--print` value reporting the title before each video is downloaded.
pub(crate) fn title_template() -> String {
    format!("before_dl:{TITLE_TAG} %(title)s")
}

/// `--print` value reporting the playlist position before each video.
pub(crate) fn item_template() -> String {
    format!("before_dl:{ITEM_TAG} %(playlist_index)s/%(playlist_count)s %(playlist_title)s")
}

/// `--print` value reporting the final path once post-processing has moved the file.
pub(crate) fn file_template() -> String {
    format!("after_move:{FILE_TAG} %(filepath)s")
}

/// One progress sample of the running download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// Percent complete in [0, 100]; `None` when yt-dlp does not know the total size.
    pub percent: Option<f64>,
    pub speed: Option<String>,
    pub eta: Option<String>,
}

impl DownloadProgress {
    pub fn is_complete(&self) -> bool {
        self.percent.map_or(false, |p| p >= 100.0)
    }
}

impl fmt::Display for DownloadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent {
            Some(p) => write!(f, "Downloading: {p:.1}%")?,
            None => write!(f, "Downloading: N/A")?,
        }
        write!(
            f,
            " - Speed: {} - ETA: {}",
            self.speed.as_deref().unwrap_or("N/A"),
            self.eta.as_deref().unwrap_or("N/A")
        )
    }
}

/// A classified line of yt-dlp output.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Progress(DownloadProgress),
    /// Title of the video about to be downloaded.
    Title(String),
    /// Position within a playlist (1-based), when known.
    PlaylistItem {
        index: Option<u32>,
        count: Option<u32>,
        playlist: Option<String>,
    },
    /// Final file path after ffmpeg post-processing.
    Finished(PathBuf),
    /// Any other output line.
    Message(String),
}

/// yt-dlp prints `NA`, `N/A` or `Unknown ...` for fields it cannot compute.
fn known(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty()
        || field == "NA"
        || field == "N/A"
        || field.starts_with("Unknown")
        || field.starts_with("unknown")
    {
        None
    } else {
        Some(field.to_string())
    }
}

fn parse_percent(field: &str) -> Option<f64> {
    let value: f64 = known(field)?.trim_end_matches('%').trim().parse().ok()?;
    Some(value.clamp(0.0, 100.0))
}

fn parse_progress(rest: &str) -> DownloadProgress {
    let mut parts = rest.splitn(3, '|');
    let percent = parts.next().and_then(parse_percent);
    let speed = parts.next().and_then(known);
    let eta = parts.next().and_then(known);
    DownloadProgress {
        percent,
        speed,
        eta,
    }
}

fn parse_item(rest: &str) -> ProgressEvent {
    let (position, playlist) = match rest.split_once(' ') {
        Some((pos, title)) => (pos, known(title)),
        None => (rest, None),
    };
    let (index, count) = match position.split_once('/') {
        Some((i, n)) => (i.trim().parse().ok(), n.trim().parse().ok()),
        None => (position.trim().parse().ok(), None),
    };
    ProgressEvent::PlaylistItem {
        index,
        count,
        playlist,
    }
}

/// Classifies one line of yt-dlp stdout.
pub fn parse_line(line: &str) -> ProgressEvent {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix(PROGRESS_TAG) {
        return ProgressEvent::Progress(parse_progress(rest.trim()));
    }
    if let Some(rest) = trimmed.strip_prefix(TITLE_TAG) {
        return ProgressEvent::Title(rest.trim().to_string());
    }
    if let Some(rest) = trimmed.strip_prefix(ITEM_TAG) {
        return parse_item(rest.trim());
    }
    if let Some(rest) = trimmed.strip_prefix(FILE_TAG) {
        return ProgressEvent::Finished(PathBuf::from(rest.trim()));
    }
    ProgressEvent::Message(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_progress_line() {
        let ev = parse_line("[ytdl:progress]  45.3%|   1.20MiB/s|00:05");
        assert_eq!(
            ev,
            ProgressEvent::Progress(DownloadProgress {
                percent: Some(45.3),
                speed: Some("1.20MiB/s".into()),
                eta: Some("00:05".into()),
            })
        );
    }

    #[test]
    fn unknown_fields_become_none() {
        let ev = parse_line("[ytdl:progress] N/A|Unknown B/s|Unknown");
        match ev {
            ProgressEvent::Progress(p) => {
                assert!(p.percent.is_none());
                assert!(p.speed.is_none());
                assert!(p.eta.is_none());
            }
            other => panic!("expected progress, got {other:?}"),
        }
    }

    #[test]
    fn progress_display() {
        let p = DownloadProgress {
            percent: Some(7.0),
            speed: Some("500.00KiB/s".into()),
            eta: None,
        };
        assert_eq!(
            p.to_string(),
            "Downloading: 7.0% - Speed: 500.00KiB/s - ETA: N/A"
        );
        assert!(!p.is_complete());
    }

    #[test]
    fn complete_at_hundred() {
        match parse_line("[ytdl:progress] 100.0%|2.00MiB/s|00:00") {
            ProgressEvent::Progress(p) => assert!(p.is_complete()),
            other => panic!("expected progress, got {other:?}"),
        }
    }

    #[test]
    fn parses_title_and_file() {
        assert_eq!(
            parse_line("[ytdl:title] Never Gonna Give You Up"),
            ProgressEvent::Title("Never Gonna Give You Up".into())
        );
        assert_eq!(
            parse_line("[ytdl:file] /tmp/out/Never Gonna Give You Up.mp4\n"),
            ProgressEvent::Finished(PathBuf::from("/tmp/out/Never Gonna Give You Up.mp4"))
        );
    }

    #[test]
    fn parses_playlist_item() {
        assert_eq!(
            parse_line("[ytdl:item] 3/12 My Playlist"),
            ProgressEvent::PlaylistItem {
                index: Some(3),
                count: Some(12),
                playlist: Some("My Playlist".into()),
            }
        );
        assert_eq!(
            parse_line("[ytdl:item] NA/NA NA"),
            ProgressEvent::PlaylistItem {
                index: None,
                count: None,
                playlist: None,
            }
        );
    }

    #[test]
    fn other_lines_are_messages() {
        assert_eq!(
            parse_line("[Merger] Merging formats into \"a.mp4\""),
            ProgressEvent::Message("[Merger] Merging formats into \"a.mp4\"".into())
        );
    }

    #[test]
    fn templates_carry_tags() {
        assert!(progress_template().starts_with("download:[ytdl:progress] "));
        assert!(title_template().starts_with("before_dl:[ytdl:title] "));
        assert!(file_template().starts_with("after_move:[ytdl:file] "));
        assert!(item_template().contains("%(playlist_index)s"));
    }
}
