//! `ytdl list <file>` – download every URL in a text file.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use ytdl_core::config::YtdlConfig;
use ytdl_core::YtdlError;

use super::download_session;
use crate::cli::render::{print_saved, ProgressPrinter};

pub async fn run_list(cfg: &YtdlConfig, file: &Path, output: Option<PathBuf>) -> Result<()> {
    let out_dir = cfg.resolve_download_dir(output)?;
    let session = download_session(cfg);

    let mut printer = ProgressPrinter::stdout();
    let report = session
        .download_list(file, &out_dir, |ev| printer.handle(&ev))
        .await;
    printer.finish();
    let report = report.with_context(|| format!("batch download from {}", file.display()))?;

    if report.stopped {
        println!(
            "Downloaded {} of {} videos before stopping.",
            report.succeeded(),
            report.total
        );
        return Err(YtdlError::Stopped.into());
    }

    println!("{:<8} {}", "RESULT", "URL");
    for o in &report.outcomes {
        let state = if o.is_success() { "ok" } else { "failed" };
        println!("{:<8} {}", state, o.url);
    }

    let saved: Vec<PathBuf> = report.files().cloned().collect();
    if !saved.is_empty() {
        println!("Saved {} file(s):", saved.len());
        print_saved(&saved, &out_dir);
    }

    if !report.is_success() {
        bail!(
            "{} of {} videos failed to download; check the log for details",
            report.failed(),
            report.total
        );
    }
    println!("All videos in the list downloaded successfully!");
    Ok(())
}
