//! `ytdl formats <url>` – list the formats available for a video.

use anyhow::{bail, Context, Result};
use ytdl_core::config::YtdlConfig;
use ytdl_core::format::{build_format_menu, FormatOption};
use ytdl_core::preflight;
use ytdl_core::url_model::is_youtube_url;
use ytdl_core::ytdlp::YtDlp;
use ytdl_core::YtdlError;

/// Checks tools and network, then asks yt-dlp for the video's formats.
pub(crate) async fn fetch_menu(
    cfg: &YtdlConfig,
    url: &str,
) -> Result<(Option<String>, Vec<FormatOption>)> {
    if !is_youtube_url(url) {
        bail!(YtdlError::InvalidUrl(url.to_string()));
    }
    let tools = preflight::check_tools(cfg)?;
    preflight::check_network(cfg).await?;
    println!("Fetching available formats for: {url}...");
    let info = YtDlp::new(tools.ytdlp)
        .fetch_video_info(cfg, url)
        .await
        .with_context(|| format!("fetching formats for {url}"))?;
    Ok((info.title, build_format_menu(&info.formats)))
}

pub async fn run_formats(cfg: &YtdlConfig, url: &str) -> Result<()> {
    let (title, menu) = fetch_menu(cfg, url).await?;
    if let Some(title) = title {
        println!("{title}");
    }
    println!("{:<20} {}", "FORMAT", "DESCRIPTION");
    for option in &menu {
        println!("{:<20} {}", option.choice.to_string(), option.label);
    }
    println!("Successfully loaded {} formats for selection.", menu.len());
    println!("Download with: ytdl get {url} --format <FORMAT>");
    Ok(())
}
