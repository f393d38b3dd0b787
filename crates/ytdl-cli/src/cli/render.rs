//! Terminal output for session events.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use ytdl_core::progress::{DownloadProgress, ProgressEvent};
use ytdl_core::session::SessionEvent;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// One-line text for events that are printed as-is (everything but progress samples).
pub fn describe_event(ev: &SessionEvent) -> Option<String> {
    match ev {
        SessionEvent::Status(s) => Some(s.clone()),
        SessionEvent::ItemFailed { url, error } => Some(format!(
            "Failed to download {url}: {error}. Skipping to the next URL..."
        )),
        SessionEvent::Ytdlp(ProgressEvent::Title(t)) => Some(format!("Starting download for: {t}")),
        SessionEvent::Ytdlp(ProgressEvent::PlaylistItem {
            index,
            count,
            playlist,
        }) => {
            let pos = match (index, count) {
                (Some(i), Some(n)) => format!("{i}/{n}"),
                (Some(i), None) => i.to_string(),
                _ => "?".to_string(),
            };
            Some(match playlist {
                Some(p) => format!("Playlist {p}: video {pos}"),
                None => format!("Playlist video {pos}"),
            })
        }
        SessionEvent::Ytdlp(ProgressEvent::Finished(path)) => {
            Some(format!("File saved to: {}", path.display()))
        }
        SessionEvent::Ytdlp(ProgressEvent::Progress(_))
        | SessionEvent::Ytdlp(ProgressEvent::Message(_)) => None,
    }
}

/// Prints events; progress samples are redrawn in place and throttled.
pub struct ProgressPrinter<W: Write> {
    out: W,
    last_progress: Option<Instant>,
    mid_line: bool,
}

impl ProgressPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_progress: None,
            mid_line: false,
        }
    }

    pub fn handle(&mut self, ev: &SessionEvent) {
        self.handle_at(ev, Instant::now());
    }

    fn handle_at(&mut self, ev: &SessionEvent, now: Instant) {
        match ev {
            SessionEvent::Ytdlp(ProgressEvent::Progress(p)) => self.progress(p, now),
            other => {
                if let Some(line) = describe_event(other) {
                    self.line(&line);
                }
            }
        }
    }

    fn progress(&mut self, p: &DownloadProgress, now: Instant) {
        let due = self
            .last_progress
            .map_or(true, |t| now.duration_since(t) >= PROGRESS_INTERVAL);
        if !due && !p.is_complete() {
            return;
        }
        let _ = write!(self.out, "\r  {p}    ");
        let _ = self.out.flush();
        self.last_progress = Some(now);
        self.mid_line = true;
        if p.is_complete() {
            self.end_line();
            self.last_progress = None;
        }
    }

    fn end_line(&mut self) {
        if self.mid_line {
            let _ = writeln!(self.out);
            self.mid_line = false;
        }
    }

    pub fn line(&mut self, text: &str) {
        self.end_line();
        let _ = writeln!(self.out, "{text}");
    }

    /// Terminates a pending progress line.
    pub fn finish(&mut self) {
        self.end_line();
        let _ = self.out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

/// Prints the saved files, or the save location when yt-dlp reported none.
pub fn print_saved(files: &[PathBuf], out_dir: &std::path::Path) {
    if files.is_empty() {
        println!("Files saved to: {}", out_dir.display());
        return;
    }
    for f in files {
        println!("  {}", f.display());
    }
}
