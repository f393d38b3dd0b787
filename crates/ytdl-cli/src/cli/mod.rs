//! CLI for ytdl.

mod commands;
mod prompt;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use ytdl_core::config;
use ytdl_core::format::FormatChoice;

use commands::{
    run_check, run_completions, run_formats, run_get, run_interactive, run_list, run_man,
    run_playlist,
};

/// Top-level CLI for ytdl.
#[derive(Debug, Parser)]
#[command(name = "ytdl", version)]
#[command(
    about = "ytdl: download YouTube videos with yt-dlp, post-processed by ffmpeg",
    long_about = "ytdl: download YouTube videos with yt-dlp, post-processed by ffmpeg.\n\n\
                  Run without a subcommand to be prompted for a URL, format and save location."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a single video.
    Get {
        /// YouTube video URL.
        url: String,

        /// best, a format id from `ytdl formats` (video + audio), <id>_video_only, or audio_only.
        #[arg(short, long, default_value = "best", value_name = "FORMAT")]
        format: FormatChoice,

        /// Save location (default: configured download_dir, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Download every YouTube URL listed in a text file (one per line).
    List {
        /// Path to the URL file.
        file: PathBuf,

        /// Save location (default: configured download_dir, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Download a whole playlist into a folder named after it.
    Playlist {
        /// YouTube playlist URL.
        url: String,

        /// Save location (default: configured download_dir, else the current directory).
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// List the formats available for a video.
    Formats {
        /// YouTube video URL.
        url: String,
    },

    /// Check that yt-dlp, ffmpeg and the network are available.
    Check,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Output-only commands need neither config nor tools.
        match cli.command {
            Some(CliCommand::Completions { shell }) => return run_completions(shell),
            Some(CliCommand::Man) => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            None => run_interactive(&cfg).await?,
            Some(CliCommand::Get {
                url,
                format,
                output,
            }) => run_get(&cfg, &url, &format, output).await?,
            Some(CliCommand::List { file, output }) => run_list(&cfg, &file, output).await?,
            Some(CliCommand::Playlist { url, output }) => run_playlist(&cfg, &url, output).await?,
            Some(CliCommand::Formats { url }) => run_formats(&cfg, &url).await?,
            Some(CliCommand::Check) => run_check(&cfg).await?,
            Some(CliCommand::Completions { .. }) | Some(CliCommand::Man) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
