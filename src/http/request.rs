use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

/// Usable bytes in the method field.
pub const METHOD_LEN: usize = 4;
/// Usable bytes in the protocol version field.
pub const VERSION_LEN: usize = 9;
/// Usable bytes in the path field, root prefix included (`PATH_MAX` minus the terminator).
pub const PATH_LEN: usize = 4095;

/// HTTP request methods the server recognizes.
///
/// Only `GET` is serviced. `POST` is recognized so that it can be answered
/// with 501 Not Implemented; every other method is a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Recognized, never serviced
    POST,
}

impl Method {
    /// Parses an HTTP method from the raw method field.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use shelf::http::request::Method;
    /// assert_eq!(Method::from_bytes(b"GET"), Some(Method::GET));
    /// assert_eq!(Method::from_bytes(b"get"), None);
    /// assert_eq!(Method::from_bytes(b"PUT"), None);
    /// ```
    pub fn from_bytes(raw: &[u8]) -> Option<Self> {
        match raw {
            b"GET" => Some(Method::GET),
            b"POST" => Some(Method::POST),
            _ => None,
        }
    }
}

/// A fixed-capacity byte field.
///
/// Storage is allocated once at its full capacity and never grows: every
/// write is checked against `N` and bytes past the bound are refused.
#[derive(Clone)]
pub struct BoundedField<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> BoundedField<N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    /// Appends one byte. Returns `false` (and stores nothing) when full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf[self.len] = byte;
        self.len += 1;
        true
    }

    /// Appends as much of `bytes` as fits and returns how many were stored.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(N - self.len);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        n
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl<const N: usize> Default for BoundedField<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for BoundedField<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for BoundedField<N> {}

impl<const N: usize> fmt::Debug for BoundedField<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

/// The request line of one connection.
///
/// `path` is not the URL path as sent: it already carries the server root as
/// a prefix, so it names a filesystem location directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Raw method bytes, truncated to [`METHOD_LEN`]
    pub method: BoundedField<METHOD_LEN>,
    /// Root prefix plus the requested path, truncated to [`PATH_LEN`]
    pub path: BoundedField<PATH_LEN>,
    /// Protocol version as sent (typically "HTTP/1.1"), truncated to [`VERSION_LEN`]
    pub version: BoundedField<VERSION_LEN>,
}

impl Request {
    /// The recognized method, or `None` for anything the server rejects as a bad request.
    pub fn method(&self) -> Option<Method> {
        Method::from_bytes(self.method.as_bytes())
    }

    /// The path field as a filesystem path.
    pub fn fs_path(&self) -> PathBuf {
        PathBuf::from(OsStr::from_bytes(self.path.as_bytes()))
    }
}
