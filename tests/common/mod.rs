#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use shelf::http::connection::handle_connection;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A temporary document root. The path is canonical so it matches what the
/// server would have been configured with.
pub struct Site {
    _dir: TempDir,
    pub root: PathBuf,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        Self { _dir: dir, root }
    }

    pub fn file(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Sends `request` over an in-memory stream and returns everything written back.
    pub async fn exchange(&self, request: &[u8]) -> Vec<u8> {
        exchange(&self.root, request).await
    }
}

pub async fn exchange(root: &Path, request: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    let root: Arc<Path> = Arc::from(root);
    let handler = tokio::spawn(handle_connection(server, root));

    client.write_all(request).await.unwrap();
    client.shutdown().await.unwrap();

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    handler.await.unwrap();
    response
}

/// Splits a raw response into its head (status line and headers) and body.
pub fn split(response: &[u8]) -> (String, Vec<u8>) {
    let end = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(response[..end].to_vec()).unwrap();
    (head, response[end + 4..].to_vec())
}

pub fn status_line(response: &[u8]) -> String {
    let (head, _) = split(response);
    head.lines().next().unwrap_or_default().to_string()
}

pub fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

/// False when running with privileges that ignore file modes (e.g. root),
/// in which case permission tests have nothing to observe.
pub fn modes_enforced() -> bool {
    let scratch = tempfile::tempdir().unwrap();
    let locked = scratch.path().join("locked");
    fs::create_dir(&locked).unwrap();
    set_mode(&locked, 0o000);
    let enforced = fs::read_dir(&locked).is_err();
    set_mode(&locked, 0o755);
    enforced
}
