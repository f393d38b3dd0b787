//! `ytdl playlist <url>` – download a whole playlist.

use anyhow::{Context, Result};
use std::path::PathBuf;
use ytdl_core::config::YtdlConfig;

use super::download_session;
use crate::cli::render::{print_saved, ProgressPrinter};

pub async fn run_playlist(cfg: &YtdlConfig, url: &str, output: Option<PathBuf>) -> Result<()> {
    let out_dir = cfg.resolve_download_dir(output)?;
    let session = download_session(cfg);

    let mut printer = ProgressPrinter::stdout();
    let outcome = session
        .download_playlist(url, &out_dir, |ev| printer.handle(&ev))
        .await;
    printer.finish();
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            let saved = e.saved_files();
            if !saved.is_empty() {
                println!(
                    "Playlist partly downloaded: {} video(s) saved before the failure.",
                    saved.len()
                );
                print_saved(saved, &out_dir);
            }
            return Err(e).with_context(|| format!("downloading playlist {url}"));
        }
    };

    println!(
        "Playlist download completed: {} video(s).",
        outcome.files.len()
    );
    print_saved(&outcome.files, &out_dir);
    Ok(())
}
