use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::http::emitter;
use crate::http::error::HttpError;
use crate::http::parser::read_request;
use crate::http::probe::{Classification, probe};
use crate::http::request::{Method, Request};
use crate::http::response::StatusCode;

/// What the `Respond` state will send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Error(HttpError),
    File(PathBuf),
    Directory(PathBuf),
}

pub enum ConnectionState {
    Start,
    ParseRequest,
    ValidateMethod(Request),
    Probe(Request),
    Respond(Request, Reply),
    Close,
    Closed,
}

/// One accepted connection, driven from `Start` to `Closed` exactly once.
pub struct Connection<S> {
    stream: S,
    root: Arc<Path>,
    state: ConnectionState,
    status: Option<StatusCode>,
}

/// Serves a single request on `stream` and closes it.
///
/// Never fails: every problem either becomes an error response or is logged.
/// The stream is shut down and dropped on every path.
pub async fn handle_connection<S>(stream: S, root: Arc<Path>) -> Option<StatusCode>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut conn = Connection::new(stream, root);
    conn.run().await;
    conn.status()
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, root: Arc<Path>) -> Self {
        Self {
            stream,
            root,
            state: ConnectionState::Start,
            status: None,
        }
    }

    /// The status sent, once the `Respond` state has run.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub async fn run(&mut self) {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);
            self.state = match state {
                ConnectionState::Start => ConnectionState::ParseRequest,

                ConnectionState::ParseRequest => {
                    let request = read_request(&mut self.stream, &self.root).await;
                    tracing::debug!(
                        method = %request.method.to_string_lossy(),
                        path = %request.path.to_string_lossy(),
                        version = %request.version.to_string_lossy(),
                        "request line read"
                    );
                    ConnectionState::ValidateMethod(request)
                }

                ConnectionState::ValidateMethod(request) => match request.method() {
                    Some(Method::GET) => ConnectionState::Probe(request),
                    Some(Method::POST) => {
                        ConnectionState::Respond(request, Reply::Error(HttpError::NotImplemented))
                    }
                    None => ConnectionState::Respond(request, Reply::Error(HttpError::BadRequest)),
                },

                ConnectionState::Probe(request) => {
                    let path = request.fs_path();
                    let reply = match probe(&path).await {
                        Classification::RegularFile => Reply::File(path),
                        Classification::Directory => Reply::Directory(path),
                        Classification::Missing => Reply::Error(HttpError::NotFound),
                        Classification::PermissionDenied => Reply::Error(HttpError::Forbidden),
                        Classification::Other => Reply::Error(HttpError::InternalError),
                    };
                    ConnectionState::Respond(request, reply)
                }

                ConnectionState::Respond(request, reply) => {
                    let status = self.respond(reply).await;
                    tracing::info!(
                        method = %request.method.to_string_lossy(),
                        path = %request.path.to_string_lossy(),
                        status = status.as_u16(),
                        "request served"
                    );
                    self.status = Some(status);
                    ConnectionState::Close
                }

                ConnectionState::Close => {
                    // Ends the write half; the read half goes when the stream is dropped.
                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "shutdown failed");
                    }
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }
    }

    async fn respond(&mut self, reply: Reply) -> StatusCode {
        match reply {
            Reply::Error(err) => emitter::send_error(&mut self.stream, err).await,
            Reply::File(path) => emitter::send_file(&mut self.stream, &path).await,
            Reply::Directory(path) => emitter::send_dir(&mut self.stream, &path).await,
        }
    }
}
