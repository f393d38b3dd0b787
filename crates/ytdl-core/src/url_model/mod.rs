//! URL validation and URL-list files.
//!
//! Only YouTube URLs are accepted: yt-dlp supports many more sites, but the
//! format presets below are tuned for YouTube's mp4/m4a streams.

mod list;

pub use list::read_url_file;

/// Hosts (and their subdomains) accepted as YouTube.
const YOUTUBE_DOMAINS: &[&str] = &["youtube.com", "youtu.be"];

/// Returns true if `url` is an http(s) URL on a YouTube host.
///
/// Subdomains such as `www.`, `m.` and `music.` are accepted; lookalike hosts
/// such as `notyoutube.com` are not.
pub fn is_youtube_url(url: &str) -> bool {
    let parsed = match url::Url::parse(url.trim()) {
        Ok(u) => u,
        Err(_) => return false,
    };
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }
    let host = match parsed.host_str() {
        Some(h) => h.to_ascii_lowercase(),
        None => return false,
    };
    YOUTUBE_DOMAINS
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{d}")))
}
