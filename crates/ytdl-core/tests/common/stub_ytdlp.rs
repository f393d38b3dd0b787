//! Shell-script stand-in for yt-dlp used by integration tests.
//!
//! Behaviour depends on the URL (last argument):
//! - contains `fail`: prints an `ERROR:` line to stderr and exits 1
//! - contains `slow`: prints a title, then sleeps for 30s
//! - contains `latin1`: prints a Latin-1 encoded title on stdout and stderr
//! - playlist URL containing `partial`: saves items 1 and 3, fails item 2, exits 1
//! - otherwise: prints title/progress/file lines and writes a small file
//!   next to the `-o` template; with `--yes-playlist`, two items.
//!
//! With `-J` as first argument it prints canned metadata JSON instead.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::OnceLock;

const SCRIPT: &str = r#"#!/bin/sh
out=""
prev=""
url=""
playlist=0
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  if [ "$a" = "--yes-playlist" ]; then playlist=1; fi
  prev="$a"
  url="$a"
done

case "$url" in
  *fail*)
    echo "WARNING: stub warning" >&2
    echo "ERROR: [youtube] fail: Video unavailable" >&2
    exit 1
    ;;
esac

if [ "$1" = "-J" ]; then
  cat <<'JSON'
{"id": "abc", "title": "Stub Video", "formats": [
  {"format_id": "140", "ext": "m4a", "vcodec": "none"},
  {"format_id": "136", "ext": "mp4", "vcodec": "avc1", "height": 720, "filesize": 2000},
  {"format_id": "137", "ext": "mp4", "vcodec": "avc1", "height": 1080, "filesize": 5000}
]}
JSON
  exit 0
fi

case "$url" in
  *slow*)
    echo "[ytdl:title] Slow Video"
    exec sleep 30
    ;;
esac

dir=$(dirname "$out")
mkdir -p "$dir"
if [ "$playlist" = "1" ]; then
  case "$url" in
    *partial*)
      for i in 1 2 3; do
        echo "[ytdl:item] $i/3 Stub List"
        echo "[ytdl:title] Item $i"
        if [ "$i" = "2" ]; then
          echo "ERROR: [youtube] item2: Private video" >&2
          continue
        fi
        printf 'media' > "$dir/Item $i.mp4"
        echo "[ytdl:file] $dir/Item $i.mp4"
      done
      exit 1
      ;;
  esac
  for i in 1 2; do
    echo "[ytdl:item] $i/2 Stub List"
    echo "[ytdl:title] Item $i"
    printf 'media' > "$dir/Item $i.mp4"
    echo "[ytdl:file] $dir/Item $i.mp4"
  done
  exit 0
fi

id="${url##*/}"
case "$url" in
  *latin1*)
    printf '[ytdl:title] Caf\351\n'
    printf 'WARNING: title Caf\351 is not UTF-8\n' >&2
    ;;
  *)
    echo "[ytdl:title] Stub $id"
    ;;
esac
echo "[ytdl:progress]  50.0%|1.00MiB/s|00:01"
echo "[ytdl:progress] 100.0%|1.00MiB/s|00:00"
printf 'media' > "$dir/Stub $id.mp4"
echo "[ytdl:file] $dir/Stub $id.mp4"
"#;

/// Path to the executable stub, written once per test process.
///
/// Written before any test spawns a child so no fork inherits an open write handle.
pub fn stub_path() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!("ytdl-stub-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("yt-dlp");
        fs::write(&path, SCRIPT).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
    .clone()
}
