//! Content-type lookup by file extension.
//!
//! The table is a process-wide constant. Lookups are exact and
//! case-sensitive on the text after the last `.` of the whole path, so
//! `index.HTML` does not match the `html` entry.

use std::collections::HashMap;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::LazyLock;

/// Served when the path has no extension or the extension is unknown.
pub const DEFAULT_MIME: &str = "text/plain; charset=utf-8";

const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("mjs", "text/javascript"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("txt", "text/plain"),
    ("asc", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("wasm", "application/wasm"),
    ("ogg", "application/ogg"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("webm", "video/webm"),
];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| MIME_TYPES.iter().copied().collect());

/// Builds the table. Called once before the accept loop so no connection
/// pays for initialization.
pub fn init() {
    LazyLock::force(&TABLE);
}

/// Looks up an extension (without the dot).
pub fn lookup(extension: &str) -> Option<&'static str> {
    TABLE.get(extension).copied()
}

/// Content type for a path, falling back to [`DEFAULT_MIME`].
pub fn content_type(path: &Path) -> &'static str {
    let bytes = path.as_os_str().as_bytes();
    bytes
        .iter()
        .rposition(|&b| b == b'.')
        .and_then(|dot| std::str::from_utf8(&bytes[dot + 1..]).ok())
        .and_then(lookup)
        .unwrap_or(DEFAULT_MIME)
}
