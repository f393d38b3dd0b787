//! `ytdl check` – report whether yt-dlp, ffmpeg and the network are usable.

use anyhow::{bail, Result};
use std::path::PathBuf;
use ytdl_core::config::{self, YtdlConfig};
use ytdl_core::logging;
use ytdl_core::preflight::{check_network, locate_tool, tool_version};

async fn report_tool(configured: PathBuf, tool: &'static str, version_flag: &str) -> bool {
    match locate_tool(&configured, tool) {
        Ok(path) => {
            let version = tool_version(&path, version_flag)
                .await
                .unwrap_or_else(|e| format!("version unknown: {e}"));
            println!("{:<8} {:<8} {} ({})", tool, "ok", path.display(), version);
            true
        }
        Err(e) => {
            println!("{:<8} {:<8} {}", tool, "MISSING", e);
            false
        }
    }
}

pub async fn run_check(cfg: &YtdlConfig) -> Result<()> {
    let mut ok = report_tool(cfg.ytdlp_bin.clone(), "yt-dlp", "--version").await;
    let ffmpeg = cfg
        .ffmpeg_bin
        .clone()
        .unwrap_or_else(|| PathBuf::from("ffmpeg"));
    ok &= report_tool(ffmpeg, "ffmpeg", "-version").await;

    match check_network(cfg).await {
        Ok(()) => println!("{:<8} {:<8} {}", "network", "ok", cfg.network_probe_addr),
        Err(e) => {
            ok = false;
            println!("{:<8} {:<8} {}", "network", "DOWN", e);
        }
    }

    if let Ok(path) = config::config_path() {
        println!("config: {}", path.display());
    }
    if let Ok(path) = logging::log_file_path() {
        println!("log:    {}", path.display());
    }

    if !ok {
        bail!("environment check failed; install the missing tools or check your connection");
    }
    println!("Everything is ready.");
    Ok(())
}
