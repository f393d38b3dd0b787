//! Interactive terminal prompts (used when `ytdl` runs without a subcommand).

use std::io::{self, BufRead, Write};
use ytdl_core::format::{FormatChoice, FormatOption};
use ytdl_core::url_model::is_youtube_url;

/// Give up after this many invalid answers to the same question.
const MAX_ATTEMPTS: usize = 3;

fn eof() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

/// Asks `question`; an empty answer yields `default` (or an empty string).
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    default: Option<&str>,
) -> io::Result<String> {
    match default {
        Some(d) => write!(out, "{question} [{d}]: ")?,
        None => write!(out, "{question}: ")?,
    }
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(eof());
    }
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(default.unwrap_or("").to_string());
    }
    Ok(answer.to_string())
}

/// Yes/no question, default no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<bool> {
    let answer = ask(input, out, &format!("{question} (y/N)"), None)?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Asks for a YouTube URL until a valid one is given.
pub fn ask_url<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let url = ask(input, out, "YouTube URL", None)?;
        if is_youtube_url(&url) {
            return Ok(url);
        }
        writeln!(
            out,
            "Please enter a valid YouTube URL (https://www.youtube.com/... or https://youtu.be/...)."
        )?;
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "no valid YouTube URL entered",
    ))
}

/// Asks for a format token (`best`, `<id>`, `<id>_video_only`, `audio_only`).
pub fn ask_format_token<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<FormatChoice> {
    for _ in 0..MAX_ATTEMPTS {
        let token = ask(
            input,
            out,
            "Format (best, <id>, <id>_video_only, audio_only)",
            Some("best"),
        )?;
        match token.parse::<FormatChoice>() {
            Ok(choice) => return Ok(choice),
            Err(e) => writeln!(out, "{e}")?,
        }
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "no valid format entered",
    ))
}

/// Shows a numbered menu and returns the chosen entry (default: the first).
pub fn choose_format<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    menu: &[FormatOption],
) -> io::Result<FormatChoice> {
    let Some(first) = menu.first() else {
        return Ok(FormatChoice::Best);
    };
    for (i, option) in menu.iter().enumerate() {
        writeln!(out, "{:>3}) {}", i + 1, option.label)?;
    }
    for _ in 0..MAX_ATTEMPTS {
        let answer = ask(input, out, "Choose a format", Some("1"))?;
        match answer.parse::<usize>() {
            Ok(n) if (1..=menu.len()).contains(&n) => return Ok(menu[n - 1].choice.clone()),
            _ => writeln!(out, "Please enter a number between 1 and {}.", menu.len())?,
        }
    }
    writeln!(out, "Using {}.", first.label)?;
    Ok(first.choice.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run<T>(
        input: &str,
        f: impl FnOnce(&mut Cursor<Vec<u8>>, &mut Vec<u8>) -> T,
    ) -> (T, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let value = f(&mut input, &mut out);
        (value, String::from_utf8(out).unwrap())
    }

    #[test]
    fn ask_returns_default_on_empty_answer() {
        let (v, out) = run("\n", |i, o| ask(i, o, "Save location", Some("/tmp")));
        assert_eq!(v.unwrap(), "/tmp");
        assert_eq!(out, "Save location [/tmp]: ");
    }

    #[test]
    fn ask_fails_on_eof() {
        let (v, _) = run("", |i, o| ask(i, o, "Q", None));
        assert_eq!(v.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn confirm_accepts_yes() {
        assert!(run("y\n", |i, o| confirm(i, o, "Fetch?")).0.unwrap());
        assert!(run("YES\n", |i, o| confirm(i, o, "Fetch?")).0.unwrap());
        assert!(!run("\n", |i, o| confirm(i, o, "Fetch?")).0.unwrap());
    }

    #[test]
    fn ask_url_retries_until_valid() {
        let (v, out) = run("vimeo.com/1\nhttps://youtu.be/abc\n", |i, o| ask_url(i, o));
        assert_eq!(v.unwrap(), "https://youtu.be/abc");
        assert!(out.contains("Please enter a valid YouTube URL"));
    }

    #[test]
    fn ask_url_gives_up_after_max_attempts() {
        let (v, _) = run("a\nb\nc\nhttps://youtu.be/late\n", |i, o| ask_url(i, o));
        assert_eq!(v.unwrap_err().kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn format_token_defaults_to_best() {
        let (v, _) = run("\n", |i, o| ask_format_token(i, o));
        assert_eq!(v.unwrap(), FormatChoice::Best);
        let (v, _) = run("137_video_only\n", |i, o| ask_format_token(i, o));
        assert_eq!(v.unwrap(), FormatChoice::VideoOnly("137".into()));
    }

    #[test]
    fn choose_format_by_number() {
        let menu = vec![
            FormatOption {
                label: "Video + Audio (Best Quality)".into(),
                choice: FormatChoice::Best,
            },
            FormatOption {
                label: "Audio Only (Best Quality)".into(),
                choice: FormatChoice::AudioOnly,
            },
        ];
        let (v, out) = run("9\n2\n", |i, o| choose_format(i, o, &menu));
        assert_eq!(v.unwrap(), FormatChoice::AudioOnly);
        assert!(out.contains("  1) Video + Audio (Best Quality)"));
        assert!(out.contains("Please enter a number between 1 and 2."));
    }
}
