//! Checks run before a download: external tools present, network reachable.

use crate::config::YtdlConfig;
use crate::error::{YtdlError, YtdlResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::process::Command;

/// Resolved locations of the external tools.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    pub ytdlp: PathBuf,
    pub ffmpeg: PathBuf,
}

/// Resolves `configured` (a bare name is searched on PATH, a path is checked directly).
pub fn locate_tool(configured: &Path, tool: &'static str) -> YtdlResult<PathBuf> {
    which::which(configured).map_err(|e| {
        tracing::debug!(tool, configured = %configured.display(), "lookup failed: {}", e);
        YtdlError::ToolMissing { tool }
    })
}

/// Locates yt-dlp and ffmpeg.
pub fn check_tools(cfg: &YtdlConfig) -> YtdlResult<ToolPaths> {
    let ytdlp = locate_tool(&cfg.ytdlp_bin, "yt-dlp")?;
    let ffmpeg_cfg = cfg
        .ffmpeg_bin
        .clone()
        .unwrap_or_else(|| PathBuf::from("ffmpeg"));
    let ffmpeg = locate_tool(&ffmpeg_cfg, "ffmpeg")?;
    tracing::debug!(ytdlp = %ytdlp.display(), ffmpeg = %ffmpeg.display(), "tools located");
    Ok(ToolPaths { ytdlp, ffmpeg })
}

/// Opens (and drops) a TCP connection to the configured probe address.
pub async fn check_network(cfg: &YtdlConfig) -> YtdlResult<()> {
    let addr = cfg.network_probe_addr.clone();
    let timeout = Duration::from_secs(cfg.network_probe_timeout_secs);
    let no_network = |reason: String| YtdlError::NoNetwork {
        addr: addr.clone(),
        reason,
    };
    match tokio::time::timeout(timeout, TcpStream::connect(addr.as_str())).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(e)) => Err(no_network(e.to_string())),
        Err(_) => Err(no_network(format!(
            "timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// First line of `<bin> <flag>`, e.g. `yt-dlp --version` or `ffmpeg -version`.
pub async fn tool_version(bin: &Path, flag: &str) -> YtdlResult<String> {
    let output = Command::new(bin)
        .arg(flag)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(|source| YtdlError::Spawn {
            bin: bin.to_path_buf(),
            source,
        })?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or("").trim().to_string())
}
