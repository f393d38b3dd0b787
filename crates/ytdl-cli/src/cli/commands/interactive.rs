//! `ytdl` with no subcommand – prompt for URL, format and save location.

use anyhow::{Context, Result};
use std::io::{self, Write};
use ytdl_core::config::YtdlConfig;
use ytdl_core::format::FormatOption;

use super::formats::fetch_menu;
use super::get::run_get;
use crate::cli::prompt;

pub async fn run_interactive(cfg: &YtdlConfig) -> Result<()> {
    let default_dir = cfg.resolve_download_dir(None)?;
    let mut out = io::stdout();

    // Stdin is locked only between awaits.
    let (url, fetch) = {
        let mut input = io::stdin().lock();
        writeln!(out, "Welcome to ytdl! Let's get started with your download.")?;
        let url = prompt::ask_url(&mut input, &mut out).context("reading URL")?;
        let fetch = prompt::confirm(&mut input, &mut out, "Fetch available formats?")?;
        (url, fetch)
    };

    let mut menu: Option<Vec<FormatOption>> = None;
    if fetch {
        match fetch_menu(cfg, &url).await {
            Ok((_, options)) => menu = Some(options),
            Err(e) => writeln!(out, "Failed to fetch formats: {e:#}")?,
        }
    }

    let (format, dir) = {
        let mut input = io::stdin().lock();
        let format = match &menu {
            Some(options) => prompt::choose_format(&mut input, &mut out, options)?,
            None => prompt::ask_format_token(&mut input, &mut out).context("reading format")?,
        };
        let default_dir_str = default_dir.display().to_string();
        let dir = prompt::ask(
            &mut input,
            &mut out,
            "Save location",
            Some(default_dir_str.as_str()),
        )?;
        (format, dir)
    };

    run_get(cfg, &url, &format, Some(dir.into())).await
}
