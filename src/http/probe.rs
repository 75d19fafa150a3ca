//! Filesystem classification of a resolved request path.
//!
//! The path is used as given. `..` segments are not collapsed and nothing
//! checks that the result stays under the server root.

use std::fs::Metadata;
use std::io;
use std::path::Path;

/// What a single metadata probe found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    RegularFile,
    Directory,
    Missing,
    PermissionDenied,
    /// Exists but is neither a regular file nor a directory (socket, fifo, device).
    Other,
}

/// Stats `path` once, following symlinks, and classifies the result.
pub async fn probe(path: &Path) -> Classification {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => classify_metadata(&metadata),
        Err(e) => classify_error(&e),
    }
}

pub fn classify_metadata(metadata: &Metadata) -> Classification {
    if metadata.is_file() {
        Classification::RegularFile
    } else if metadata.is_dir() {
        Classification::Directory
    } else {
        Classification::Other
    }
}

/// Permission failures are reported as such; every other failure counts as missing.
pub fn classify_error(err: &io::Error) -> Classification {
    match err.kind() {
        io::ErrorKind::PermissionDenied => Classification::PermissionDenied,
        _ => Classification::Missing,
    }
}
