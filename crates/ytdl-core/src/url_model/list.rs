//! Reading a text file of URLs, one per line.

use super::is_youtube_url;
use crate::error::{YtdlError, YtdlResult};
use std::io::ErrorKind;
use std::path::Path;

/// Reads `path` as UTF-8 and returns the valid YouTube URLs it contains, in order.
///
/// Lines are trimmed; blank lines and lines that are not YouTube URLs are
/// skipped (and logged at debug). An empty result is returned as `Ok`; the
/// caller decides whether that is an error.
pub fn read_url_file(path: &Path) -> YtdlResult<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => YtdlError::UrlFileNotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => YtdlError::UrlFilePermission(path.to_path_buf()),
        _ => YtdlError::UrlFileIo {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let text =
        String::from_utf8(bytes).map_err(|_| YtdlError::UrlFileEncoding(path.to_path_buf()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut urls = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        if is_youtube_url(url) {
            urls.push(url.to_string());
        } else {
            tracing::debug!(line = lineno + 1, "skipping non-YouTube entry: {}", url);
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn keeps_valid_urls_in_order() {
        let f = write_tmp(
            b"https://youtu.be/aaa\n\n   https://www.youtube.com/watch?v=bbb  \nhttps://vimeo.com/1\nnot a url\n",
        );
        let urls = read_url_file(f.path()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://youtu.be/aaa".to_string(),
                "https://www.youtube.com/watch?v=bbb".to_string(),
            ]
        );
    }

    #[test]
    fn handles_crlf_and_bom() {
        let f = write_tmp(b"\xef\xbb\xbfhttps://youtu.be/aaa\r\nhttps://youtu.be/bbb\r\n");
        let urls = read_url_file(f.path()).unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://youtu.be/aaa");
    }

    #[test]
    fn empty_file_yields_empty_list() {
        let f = write_tmp(b"");
        assert!(read_url_file(f.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_url_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, YtdlError::UrlFileNotFound(_)));
    }

    #[test]
    fn invalid_utf8_is_encoding_error() {
        let f = write_tmp(&[0x68, 0x74, 0xff, 0xfe, 0x0a]);
        let err = read_url_file(f.path()).unwrap_err();
        assert!(matches!(err, YtdlError::UrlFileEncoding(_)));
    }
}
