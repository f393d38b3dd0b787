//! Running yt-dlp as a child process and streaming its output.

use super::YtDlp;
use crate::control::StopSignal;
use crate::error::{YtdlError, YtdlResult};
use crate::progress::{parse_line, ProgressEvent};
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};

/// Keep at most this many trailing stderr lines for error reporting.
const STDERR_TAIL: usize = 20;

/// What a successful run produced.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Title(s) reported before download, in order.
    pub titles: Vec<String>,
    /// Final file paths after post-processing, in order.
    pub files: Vec<PathBuf>,
}

/// Next line without its terminator, or `None` at EOF.
///
/// yt-dlp writes in the locale's encoding, so bytes are decoded lossily.
async fn next_line_lossy<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Reads stderr to the end. Warnings are logged; the tail is kept for the error message.
async fn collect_stderr<R: AsyncRead + Unpin>(stderr: R) -> Vec<String> {
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    let mut tail = VecDeque::with_capacity(STDERR_TAIL);
    loop {
        let line = match next_line_lossy(&mut reader, &mut buf).await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("reading yt-dlp stderr: {}", e);
                break;
            }
        };
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("WARNING:") {
            tracing::warn!("yt-dlp: {}", line);
        } else {
            tracing::debug!("yt-dlp stderr: {}", line);
        }
        if tail.len() == STDERR_TAIL {
            tail.pop_front();
        }
        tail.push_back(line.to_string());
    }
    tail.into()
}

/// `ERROR:` lines if yt-dlp printed any, otherwise the last stderr line.
pub(crate) fn failure_message(stderr_tail: &[String]) -> String {
    let errors: Vec<&str> = stderr_tail
        .iter()
        .filter(|l| l.starts_with("ERROR:"))
        .map(String::as_str)
        .collect();
    if !errors.is_empty() {
        return errors.join("; ");
    }
    stderr_tail
        .last()
        .cloned()
        .unwrap_or_else(|| "no error output".to_string())
}

async fn kill(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::warn!("failed to kill yt-dlp: {}", e);
    }
}

impl YtDlp {
    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn(&self, args: &[String]) -> YtdlResult<Child> {
        tracing::debug!(bin = %self.bin.display(), ?args, "spawning yt-dlp");
        self.command(args).spawn().map_err(|source| YtdlError::Spawn {
            bin: self.bin.clone(),
            source,
        })
    }

    /// Runs yt-dlp with `args`, calling `on_event` for every stdout line.
    ///
    /// Returns the reported titles and files on exit status 0. A stop request
    /// kills the child and returns [`YtdlError::Stopped`].
    pub async fn run<F>(
        &self,
        args: &[String],
        stop: &StopSignal,
        mut on_event: F,
    ) -> YtdlResult<RunOutput>
    where
        F: FnMut(&ProgressEvent),
    {
        if stop.is_stopped() {
            return Err(YtdlError::Stopped);
        }
        let mut child = self.spawn(args)?;
        let stdout = child.stdout.take().ok_or_else(|| {
            YtdlError::Io(io::Error::new(
                io::ErrorKind::Other,
                "yt-dlp stdout not captured",
            ))
        })?;
        let stderr_task = child.stderr.take().map(|s| tokio::spawn(collect_stderr(s)));

        let mut output = RunOutput::default();
        let mut reader = BufReader::new(stdout);
        let mut buf = Vec::new();
        loop {
            tokio::select! {
                line = next_line_lossy(&mut reader, &mut buf) => {
                    let Some(line) = line? else { break };
                    let event = parse_line(&line);
                    match &event {
                        ProgressEvent::Title(t) => output.titles.push(t.clone()),
                        ProgressEvent::Finished(p) => output.files.push(p.clone()),
                        ProgressEvent::Message(m) => tracing::debug!("yt-dlp: {}", m),
                        _ => {}
                    }
                    on_event(&event);
                }
                _ = stop.stopped() => {
                    kill(&mut child).await;
                    if let Some(t) = stderr_task {
                        t.abort();
                    }
                    return Err(YtdlError::Stopped);
                }
            }
        }

        let status = tokio::select! {
            status = child.wait() => status?,
            _ = stop.stopped() => {
                kill(&mut child).await;
                if let Some(t) = stderr_task {
                    t.abort();
                }
                return Err(YtdlError::Stopped);
            }
        };
        let stderr_tail = match stderr_task {
            Some(t) => t.await.unwrap_or_default(),
            None => Vec::new(),
        };

        // Ctrl-C in a terminal also reaches yt-dlp directly, so it may exit on its own.
        if stop.is_stopped() {
            return Err(YtdlError::Stopped);
        }
        if !status.success() {
            return Err(YtdlError::DownloadFailed {
                exit_code: status.code(),
                message: failure_message(&stderr_tail),
                saved: output.files,
            });
        }
        tracing::info!(files = output.files.len(), "yt-dlp finished");
        Ok(output)
    }

    /// Runs yt-dlp to completion and returns its stdout (used for `-J` metadata dumps).
    pub async fn capture(&self, args: &[String]) -> YtdlResult<String> {
        tracing::debug!(bin = %self.bin.display(), ?args, "running yt-dlp");
        let out = self
            .command(args)
            .output()
            .await
            .map_err(|source| YtdlError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let tail: Vec<String> = stderr
                .lines()
                .map(str::trim_end)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
            return Err(YtdlError::DownloadFailed {
                exit_code: out.status.code(),
                message: failure_message(&tail),
                saved: Vec::new(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_error_lines() {
        let tail = vec![
            "WARNING: something odd".to_string(),
            "ERROR: [youtube] abc: Video unavailable".to_string(),
            "trailing noise".to_string(),
        ];
        assert_eq!(
            failure_message(&tail),
            "ERROR: [youtube] abc: Video unavailable"
        );
    }

    #[test]
    fn failure_message_falls_back_to_last_line() {
        let tail = vec!["first".to_string(), "Traceback: boom".to_string()];
        assert_eq!(failure_message(&tail), "Traceback: boom");
        assert_eq!(failure_message(&[]), "no error output");
    }

    #[tokio::test]
    async fn lines_are_decoded_lossily() {
        let mut reader: &[u8] = b"[ytdl:title] Caf\xe9\r\nnext\nlast";
        let mut buf = Vec::new();
        let mut lines = Vec::new();
        while let Some(line) = next_line_lossy(&mut reader, &mut buf).await.unwrap() {
            lines.push(line);
        }
        assert_eq!(lines, vec!["[ytdl:title] Caf\u{FFFD}", "next", "last"]);
    }

    #[tokio::test]
    async fn stderr_tail_keeps_last_lines_past_bad_bytes() {
        let mut input = Vec::new();
        input.extend_from_slice(b"WARNING: Caf\xe9\n");
        for i in 0..30 {
            input.extend_from_slice(format!("line {i}\n").as_bytes());
        }
        let tail = collect_stderr(&input[..]).await;
        assert_eq!(tail.len(), STDERR_TAIL);
        assert_eq!(tail.first().map(String::as_str), Some("line 10"));
        assert_eq!(tail.last().map(String::as_str), Some("line 29"));
    }
}
