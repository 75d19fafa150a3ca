//! Synthesized HTML directory listings.

use std::borrow::Cow;
use std::fmt;
use std::fs::Metadata;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone};

const PAGE_HEAD: &str = "<html><head><style>\
    body{font-family: monospace; font-size: 13px;}\
    td {padding: 1.5px 6px;}\
    </style></head><body><table>\n";
const PAGE_TAIL: &str = "</table></body></html>";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Size column: bytes below 1 KiB, else one decimal place with a K/M/G suffix.
/// Directories show `[DIR]`.
pub fn format_size(len: u64, is_dir: bool) -> String {
    if is_dir {
        "[DIR]".to_string()
    } else if len < KIB {
        len.to_string()
    } else if len < MIB {
        format!("{:.1}K", len as f64 / KIB as f64)
    } else if len < GIB {
        format!("{:.1}M", len as f64 / MIB as f64)
    } else {
        format!("{:.1}G", len as f64 / GIB as f64)
    }
}

const UNKNOWN_TIME: &str = "????-??-?? ??:??";

/// Last-modified column, in local time.
///
/// Times chrono cannot represent come out as a placeholder of the same width.
pub fn format_timestamp(time: SystemTime) -> String {
    unix_seconds(time)
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map_or_else(
            || UNKNOWN_TIME.to_string(),
            |local| local.format("%Y-%m-%d %H:%M").to_string(),
        )
}

/// Whole seconds since the epoch, rounded toward the past.
fn unix_seconds(time: SystemTime) -> Option<i64> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).ok(),
        Err(before) => {
            let before = before.duration();
            let whole = i64::try_from(before.as_secs()).ok()?;
            Some(if before.subsec_nanos() > 0 { -whole - 1 } else { -whole })
        }
    }
}

/// Everything after the last `/` of `path`; empty when the path ends in `/`.
///
/// Links in a listing are this segment followed by the entry name, so a
/// directory requested with a trailing slash gets plain relative links.
pub fn final_segment(path: &Path) -> Cow<'_, str> {
    let bytes = path.as_os_str().as_bytes();
    let start = bytes
        .iter()
        .rposition(|&b| b == b'/')
        .map_or(0, |slash| slash + 1);
    String::from_utf8_lossy(&bytes[start..])
}

/// One visible child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: SystemTime,
}

impl ListingEntry {
    /// `None` for anything that is neither a regular file nor a directory.
    pub fn from_metadata(name: impl Into<String>, metadata: &Metadata) -> Option<Self> {
        if !metadata.is_file() && !metadata.is_dir() {
            return None;
        }
        Some(Self {
            name: name.into(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
        })
    }

    pub fn row<'a>(&'a self, link_prefix: &'a str) -> ListingRow<'a> {
        ListingRow {
            link_prefix,
            entry: self,
        }
    }
}

/// A table row: link, size, modification time.
pub struct ListingRow<'a> {
    link_prefix: &'a str,
    entry: &'a ListingEntry,
}

impl fmt::Display for ListingRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.entry;
        let slash = if entry.is_dir { "/" } else { "" };
        writeln!(
            f,
            "<tr><td><a href=\"{}{}{}\">{}{}</a></td><td>{}</td><td>{}</td></tr>",
            self.link_prefix,
            entry.name,
            slash,
            entry.name,
            slash,
            format_size(entry.size, entry.is_dir),
            format_timestamp(entry.modified),
        )
    }
}

/// Wraps pre-rendered rows in the listing page.
pub fn render_page(rows: &str) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + rows.len() + PAGE_TAIL.len());
    page.push_str(PAGE_HEAD);
    page.push_str(rows);
    page.push_str(PAGE_TAIL);
    page
}

/// Enumerates `dir` and renders its listing page.
///
/// Rows follow the order the filesystem returns entries in. Entries whose
/// metadata cannot be read are left out. Failing to open the directory is an
/// error; failing partway through ends the listing with the rows read so far.
pub async fn read_listing(dir: &Path) -> io::Result<String> {
    let link_prefix = final_segment(dir);
    let mut children = tokio::fs::read_dir(dir).await?;
    let mut rows = String::new();

    loop {
        let child = match children.next_entry().await {
            Ok(Some(child)) => child,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "directory enumeration stopped early"
                );
                break;
            }
        };

        let name = child.file_name();
        if name == "." || name == ".." {
            continue;
        }

        let metadata = match tokio::fs::metadata(child.path()).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!(entry = ?name, error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if let Some(entry) = ListingEntry::from_metadata(name.to_string_lossy(), &metadata) {
            rows.push_str(&entry.row(&link_prefix).to_string());
        }
    }

    Ok(render_page(&rows))
}
