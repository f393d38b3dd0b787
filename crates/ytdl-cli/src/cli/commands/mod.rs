//! CLI command handlers. Each command is in its own file.

mod check;
mod formats;
mod get;
mod interactive;
mod list;
mod playlist;
mod shell;

pub use check::run_check;
pub use formats::run_formats;
pub use get::run_get;
pub use interactive::run_interactive;
pub use list::run_list;
pub use playlist::run_playlist;
pub use shell::{run_completions, run_man};

use std::sync::Arc;
use ytdl_core::config::YtdlConfig;
use ytdl_core::control::StopSignal;
use ytdl_core::session::Session;

/// Session whose stop signal fires on Ctrl-C.
///
/// Installed only once a download is about to start, so Ctrl-C at a prompt
/// still terminates the process normally.
fn download_session(cfg: &YtdlConfig) -> Session {
    let stop = Arc::new(StopSignal::new());
    let handler = Arc::clone(&stop);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping download");
            handler.request_stop();
        }
    });
    Session::new(cfg.clone(), stop)
}
