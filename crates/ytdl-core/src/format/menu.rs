//! Format menu built from yt-dlp's `--dump-single-json` output.

use super::FormatChoice;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Subset of the metadata yt-dlp prints for a video.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub formats: Vec<FormatInfo>,
}

/// One entry of the `formats` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
}

impl FormatInfo {
    fn is_mp4_video(&self) -> bool {
        self.ext.as_deref() == Some("mp4")
            && self.vcodec.as_deref().map_or(false, |v| v != "none")
    }

    fn size_hint(&self) -> u64 {
        self.filesize.or(self.filesize_approx).unwrap_or(0)
    }
}

/// A selectable entry of the format menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOption {
    pub label: String,
    pub choice: FormatChoice,
}

impl FormatOption {
    fn new(label: impl Into<String>, choice: FormatChoice) -> Self {
        Self {
            label: label.into(),
            choice,
        }
    }
}

/// Builds the format menu for a video.
///
/// Only mp4 formats with video are offered. For each resolution the format
/// with the largest known size wins (first seen on ties). Order: best quality,
/// video + audio per resolution (highest first), video only per resolution,
/// audio only.
pub fn build_format_menu(formats: &[FormatInfo]) -> Vec<FormatOption> {
    let mut by_height: BTreeMap<u32, &FormatInfo> = BTreeMap::new();
    for f in formats.iter().filter(|f| f.is_mp4_video()) {
        let Some(height) = f.height else { continue };
        match by_height.get(&height) {
            Some(existing) if existing.size_hint() >= f.size_hint() => {}
            _ => {
                by_height.insert(height, f);
            }
        }
    }

    let mut menu = vec![FormatOption::new(
        "Video + Audio (Best Quality)",
        FormatChoice::Best,
    )];
    for (height, f) in by_height.iter().rev() {
        menu.push(FormatOption::new(
            format!("Video + Audio ({height}p)"),
            FormatChoice::VideoAudio(f.format_id.clone()),
        ));
    }
    for (height, f) in by_height.iter().rev() {
        menu.push(FormatOption::new(
            format!("Video Only ({height}p)"),
            FormatChoice::VideoOnly(f.format_id.clone()),
        ));
    }
    menu.push(FormatOption::new(
        "Audio Only (Best Quality)",
        FormatChoice::AudioOnly,
    ));
    menu
}
