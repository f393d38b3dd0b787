//! Format selection: what to ask yt-dlp for and how ffmpeg post-processes it.

mod menu;

pub use menu::{build_format_menu, FormatInfo, FormatOption, VideoInfo};

use crate::config::YtdlConfig;
use std::fmt;
use std::str::FromStr;

const BEST_VIDEO_AUDIO: &str = "bestvideo[ext=mp4]+bestaudio[ext=mp4]/best[ext=mp4]";
const BEST_AUDIO: &str = "bestaudio[ext=mp4]/bestaudio";
const VIDEO_ONLY_SUFFIX: &str = "_video_only";
const AUDIO_ONLY_SUFFIX: &str = "_audio_only";

/// What to download for a single video.
///
/// Textual form (CLI and format menu): `best`, `<id>`, `<id>_video_only`,
/// `audio_only`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormatChoice {
    /// Best mp4 video plus best mp4 audio, merged by ffmpeg.
    #[default]
    Best,
    /// A specific video format plus best mp4 audio, merged by ffmpeg.
    VideoAudio(String),
    /// A specific video format without audio.
    VideoOnly(String),
    /// Best audio, converted by ffmpeg to the configured codec.
    AudioOnly,
}

impl FormatChoice {
    /// Arguments selecting this format and its post-processing.
    pub fn ytdlp_args(&self, cfg: &YtdlConfig) -> Vec<String> {
        let merge = || {
            vec![
                "--merge-output-format".to_string(),
                cfg.merge_output_format.clone(),
            ]
        };
        let mut args = Vec::new();
        match self {
            FormatChoice::Best => {
                args.extend(["-f".to_string(), BEST_VIDEO_AUDIO.to_string()]);
                args.extend(merge());
            }
            FormatChoice::VideoAudio(id) => {
                args.extend(["-f".to_string(), format!("{id}+bestaudio[ext=mp4]/best[ext=mp4]")]);
                args.extend(merge());
            }
            FormatChoice::VideoOnly(id) => {
                args.extend(["-f".to_string(), id.clone()]);
                args.extend(merge());
            }
            FormatChoice::AudioOnly => {
                args.extend([
                    "-f".to_string(),
                    BEST_AUDIO.to_string(),
                    "--extract-audio".to_string(),
                    "--audio-format".to_string(),
                    cfg.audio_codec.clone(),
                    "--audio-quality".to_string(),
                    format!("{}K", cfg.audio_quality),
                ]);
            }
        }
        args
    }

    /// Short description for terminal output.
    pub fn describe(&self) -> String {
        match self {
            FormatChoice::Best => "video + audio (best quality)".to_string(),
            FormatChoice::VideoAudio(id) => format!("video + audio (format {id})"),
            FormatChoice::VideoOnly(id) => format!("video only, no audio (format {id})"),
            FormatChoice::AudioOnly => "audio only".to_string(),
        }
    }
}

impl fmt::Display for FormatChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatChoice::Best => write!(f, "best"),
            FormatChoice::VideoAudio(id) => write!(f, "{id}"),
            FormatChoice::VideoOnly(id) => write!(f, "{id}{VIDEO_ONLY_SUFFIX}"),
            FormatChoice::AudioOnly => write!(f, "audio_only"),
        }
    }
}

impl FromStr for FormatChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err("format must not be empty".to_string());
        }
        if token.chars().any(char::is_whitespace) {
            return Err(format!("invalid format {token:?}: contains whitespace"));
        }
        if token.eq_ignore_ascii_case("best") {
            return Ok(FormatChoice::Best);
        }
        if token.eq_ignore_ascii_case("audio_only")
            || token.eq_ignore_ascii_case("audio")
            || token.ends_with(AUDIO_ONLY_SUFFIX)
        {
            return Ok(FormatChoice::AudioOnly);
        }
        if let Some(id) = token.strip_suffix(VIDEO_ONLY_SUFFIX) {
            if id.is_empty() {
                return Err(format!("invalid format {token:?}: missing format id"));
            }
            return Ok(FormatChoice::VideoOnly(id.to_string()));
        }
        Ok(FormatChoice::VideoAudio(token.to_string()))
    }
}
