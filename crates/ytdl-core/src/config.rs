use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/ytdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YtdlConfig {
    /// yt-dlp executable; a bare name is looked up on PATH.
    pub ytdlp_bin: PathBuf,
    /// Explicit ffmpeg binary. When unset, ffmpeg must be on PATH and yt-dlp finds it itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg_bin: Option<PathBuf>,
    /// Default save location. When unset, the current directory is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// Passed to yt-dlp as `--socket-timeout`.
    pub socket_timeout_secs: u64,
    /// Container used when ffmpeg merges separate video and audio streams.
    pub merge_output_format: String,
    /// Codec for audio-only downloads (ffmpeg extraction).
    pub audio_codec: String,
    /// Bitrate for audio-only downloads, in kbps.
    pub audio_quality: u32,
    /// `host:port` probed before downloading to detect a missing connection.
    pub network_probe_addr: String,
    pub network_probe_timeout_secs: u64,
}

impl Default for YtdlConfig {
    fn default() -> Self {
        Self {
            ytdlp_bin: PathBuf::from("yt-dlp"),
            ffmpeg_bin: None,
            download_dir: None,
            socket_timeout_secs: 30,
            merge_output_format: "mp4".to_string(),
            audio_codec: "mp3".to_string(),
            audio_quality: 192,
            network_probe_addr: "8.8.8.8:53".to_string(),
            network_probe_timeout_secs: 5,
        }
    }
}

impl YtdlConfig {
    /// Save location for a request: explicit override, configured dir, or the current directory.
    pub fn resolve_download_dir(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = explicit.or_else(|| self.download_dir.clone()) {
            return Ok(dir);
        }
        Ok(std::env::current_dir()?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = YtdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: YtdlConfig = toml::from_str(&data)?;
    Ok(cfg)
}
