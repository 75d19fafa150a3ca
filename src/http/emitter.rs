//! Writes complete responses onto a connection.
//!
//! Every function here returns the status it actually sent and never fails:
//! transport errors are logged and dropped, since the connection is closed
//! right afterwards anyway.

use std::io;
use std::path::Path;

use tokio::io::AsyncWrite;

use crate::http::error::HttpError;
use crate::http::listing;
use crate::http::mime;
use crate::http::probe::{Classification, probe};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

const INDEX_NAME: &str = "index.html";

/// Sends the fixed error page for `err`.
pub async fn send_error<W>(stream: &mut W, err: HttpError) -> StatusCode
where
    W: AsyncWrite + Unpin,
{
    send_response(stream, &Response::error(err.status())).await
}

/// Sends a fully built response.
pub async fn send_response<W>(stream: &mut W, response: &Response) -> StatusCode
where
    W: AsyncWrite + Unpin,
{
    let mut writer = ResponseWriter::new(response);
    if let Err(e) = writer.write_to_stream(stream).await {
        tracing::warn!(
            status = response.status.as_u16(),
            written = writer.written(),
            error = %e,
            "failed to send response"
        );
    }
    response.status
}

/// Streams a regular file with a content type picked from its extension.
///
/// A file that can no longer be opened is answered with 404.
pub async fn send_file<W>(stream: &mut W, path: &Path) -> StatusCode
where
    W: AsyncWrite + Unpin,
{
    let mut file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "file vanished before it could be opened"
            );
            return send_error(stream, HttpError::NotFound).await;
        }
    };

    let head = Response::head(StatusCode::Ok, mime::content_type(path));
    let mut writer = ResponseWriter::new(&head);
    match writer.write_with_body(stream, &mut file).await {
        Ok(bytes) => tracing::debug!(path = %path.display(), bytes, "file sent"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "file transfer aborted"),
    }
    StatusCode::Ok
}

/// Serves `index.html` from the directory if there is one, otherwise a listing.
pub async fn send_dir<W>(stream: &mut W, path: &Path) -> StatusCode
where
    W: AsyncWrite + Unpin,
{
    let index = path.join(INDEX_NAME);
    if probe(&index).await == Classification::RegularFile {
        return send_file(stream, &index).await;
    }

    match listing::read_listing(path).await {
        Ok(page) => send_response(stream, &Response::html(page)).await,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot list directory");
            send_error(stream, listing_error(&e)).await
        }
    }
}

fn listing_error(err: &io::Error) -> HttpError {
    match err.kind() {
        io::ErrorKind::NotFound => HttpError::NotFound,
        io::ErrorKind::PermissionDenied => HttpError::Forbidden,
        _ => HttpError::InternalError,
    }
}
