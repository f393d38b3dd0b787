use ytdl_core::logging;
use ytdl_core::YtdlError;

mod cli;

use crate::cli::CliCommand;

/// Conventional exit status for a process ended by SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the log file is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        let stopped = err
            .downcast_ref::<YtdlError>()
            .map_or(false, YtdlError::is_stopped);
        if stopped {
            println!();
            println!("Download stopped by user.");
            std::process::exit(EXIT_INTERRUPTED);
        }
        tracing::error!("{:#}", err);
        eprintln!("ytdl error: {:#}", err);
        std::process::exit(1);
    }
}
