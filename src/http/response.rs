/// HTTP status codes the server emits.
///
/// - `Ok` (200): File or directory listing served
/// - `BadRequest` (400): Method is neither GET nor POST
/// - `Forbidden` (403): Filesystem permission denied
/// - `NotFound` (404): Path missing or vanished before it could be opened
/// - `InternalServerError` (500): Anything else, including unknown codes
/// - `NotImplemented` (501): POST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Maps a numeric code onto a status, treating anything unknown as 500.
    ///
    /// # Example
    ///
    /// ```
    /// # use shelf::http::response::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), StatusCode::NotFound);
    /// assert_eq!(StatusCode::from_u16(418), StatusCode::InternalServerError);
    /// ```
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            403 => StatusCode::Forbidden,
            404 => StatusCode::NotFound,
            501 => StatusCode::NotImplemented,
            _ => StatusCode::InternalServerError,
        }
    }

    /// Returns the numeric HTTP status code.
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }

    /// Sentence shown under the heading of an error page.
    fn explanation(&self) -> &'static str {
        match self {
            StatusCode::BadRequest => "Your browser sent an invalid request!",
            StatusCode::Forbidden => "You don't have access to this content. Check your privilege!",
            StatusCode::NotFound => "The server could not find the specified resource!",
            StatusCode::Ok | StatusCode::InternalServerError => "Oops!",
            StatusCode::NotImplemented => "This server has not implemented the requested method!",
        }
    }
}

/// A response whose body is fully known up front.
///
/// File bodies are streamed separately; for those the writer sends a
/// `Response` with an empty body and then copies the file.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// No headers are added implicitly: the connection is closed after every
/// response, which is what delimits the body.
///
/// # Example
///
/// ```
/// # use shelf::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/css")
///     .body(b"body{}".to_vec())
///     .build();
/// assert_eq!(response.headers.len(), 1);
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing any earlier header with the same name.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Status line and `Content-Type` only; the body follows from elsewhere.
    pub fn head(status: StatusCode, content_type: &str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", content_type)
            .build()
    }

    /// A synthesized HTML page with status 200.
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/html")
            .body(body.into())
            .build()
    }

    /// The fixed error page for `status`. A non-error status gets the 500 page.
    pub fn error(status: StatusCode) -> Self {
        let status = match status {
            StatusCode::Ok => StatusCode::InternalServerError,
            other => other,
        };
        let code = status.as_u16();
        let reason = status.reason_phrase();
        let body = format!(
            "<html><title>{code} {reason}</title><body><h1>{code} {reason}</h1><p>{}</p></body></html>",
            status.explanation()
        );
        ResponseBuilder::new(status)
            .header("Content-Type", "text/html")
            .body(body.into_bytes())
            .build()
    }

    /// The error page for a numeric code; see [`StatusCode::from_u16`].
    pub fn error_code(code: u16) -> Self {
        Self::error(StatusCode::from_u16(code))
    }

    /// Looks up a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
