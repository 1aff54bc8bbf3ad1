//! Remote failure taxonomy.

use thiserror::Error;

/// A failed round trip to the API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request could not be sent or no response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx status other than 401/403.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Credentials rejected (401/403), e.g. an expired token.
    #[error("authentication rejected (HTTP {status}): {message}")]
    Auth { status: u16, message: String },

    /// 2xx response whose body does not have the documented shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classifies a non-2xx status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Auth { status, message },
            _ => Self::Http { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Auth { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A type alias for `Result<T, ApiError>`.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
