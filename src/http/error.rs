use thiserror::Error;

use crate::http::response::StatusCode;

/// Conditions that end a connection with an error page.
///
/// None of these escape the connection that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("unsupported or malformed method")]
    BadRequest,
    #[error("permission denied")]
    Forbidden,
    #[error("no such file or directory")]
    NotFound,
    #[error("method not implemented")]
    NotImplemented,
    #[error("unexpected filesystem entry")]
    InternalError,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest => StatusCode::BadRequest,
            HttpError::Forbidden => StatusCode::Forbidden,
            HttpError::NotFound => StatusCode::NotFound,
            HttpError::NotImplemented => StatusCode::NotImplemented,
            HttpError::InternalError => StatusCode::InternalServerError,
        }
    }
}
