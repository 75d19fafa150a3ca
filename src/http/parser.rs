use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::request::{BoundedField, Request};

/// How reading a single field stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEnd {
    /// A `' '` or `'\n'` was consumed.
    Separator,
    /// The field reached its capacity; the next byte was left unread.
    Full,
    /// The stream ended or failed. Later fields are not read.
    Closed,
}

/// Reads the request line off `reader`, one byte at a time.
///
/// Never fails: a stream that closes or errors mid-line leaves the remaining
/// fields partially filled or empty. The path field is seeded with `root`, so
/// `GET /a.txt` under root `/srv` yields the path `/srv/a.txt`. Nothing past
/// the request line is consumed.
pub async fn read_request<R>(reader: &mut R, root: &Path) -> Request
where
    R: AsyncRead + Unpin,
{
    let mut request = Request::default();
    request.path.extend_from_slice(root.as_os_str().as_bytes());

    if read_field(reader, &mut request.method).await == FieldEnd::Closed {
        return request;
    }
    if read_field(reader, &mut request.path).await == FieldEnd::Closed {
        return request;
    }
    read_field(reader, &mut request.version).await;

    request
}

/// Fills `field` until a separator, the field bound, or the end of the stream.
///
/// `'\r'` is consumed but not stored and does not count toward the bound.
pub async fn read_field<R, const N: usize>(
    reader: &mut R,
    field: &mut BoundedField<N>,
) -> FieldEnd
where
    R: AsyncRead + Unpin,
{
    while !field.is_full() {
        let byte = match reader.read_u8().await {
            Ok(byte) => byte,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return FieldEnd::Closed,
            Err(e) => {
                tracing::debug!(error = %e, "request line read failed");
                return FieldEnd::Closed;
            }
        };

        match byte {
            b' ' | b'\n' => return FieldEnd::Separator,
            b'\r' => {}
            _ => {
                field.push(byte);
            }
        }
    }

    FieldEnd::Full
}
