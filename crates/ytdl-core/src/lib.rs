pub mod config;
pub mod logging;

pub mod control;
pub mod error;
pub mod format;
pub mod preflight;
pub mod progress;
pub mod session;
pub mod url_model;
pub mod ytdlp;

pub use error::{YtdlError, YtdlResult};
