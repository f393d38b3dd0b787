//! `ytdl get <url>` – download a single video.

use anyhow::{Context, Result};
use std::path::PathBuf;
use ytdl_core::config::YtdlConfig;
use ytdl_core::format::FormatChoice;

use super::download_session;
use crate::cli::render::{print_saved, ProgressPrinter};

pub async fn run_get(
    cfg: &YtdlConfig,
    url: &str,
    format: &FormatChoice,
    output: Option<PathBuf>,
) -> Result<()> {
    let out_dir = cfg.resolve_download_dir(output)?;
    let session = download_session(cfg);
    println!("Starting single download... Format: {}", format.describe());

    let mut printer = ProgressPrinter::stdout();
    let outcome = session
        .download_single(url, format, &out_dir, |ev| printer.handle(&ev))
        .await;
    printer.finish();
    let outcome = outcome.with_context(|| format!("downloading {url}"))?;

    println!("Download completed successfully!");
    print_saved(&outcome.files, &out_dir);
    Ok(())
}
