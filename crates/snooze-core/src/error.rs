//! Error types for the Snooze client.

use crate::api::ApiError;
use thiserror::Error;

/// A shared error type for every domain operation.
///
/// Remote failures keep the operation they happened in (`Fetch`,
/// `Submission`, ...) together with the underlying [`ApiError`], so callers
/// can report "deleting the story failed" and still branch on
/// transport vs. HTTP vs. auth failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnoozeError {
    /// Listing stories failed
    #[error("Fetching stories failed: {0}")]
    Fetch(#[source] ApiError),

    /// Creating a story failed
    #[error("Submitting the story failed: {0}")]
    Submission(#[source] ApiError),

    /// Deleting a story failed
    #[error("Deleting the story failed: {0}")]
    Deletion(#[source] ApiError),

    /// Adding or removing a favorite failed
    #[error("Updating favorites failed: {0}")]
    Favorite(#[source] ApiError),

    /// Signup, login or session restore failed
    #[error("Authentication failed: {0}")]
    Authentication(#[source] ApiError),

    /// Malformed local input caught before any remote call
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Operation needs a logged-in user
    #[error("No user is logged in")]
    NotLoggedIn,

    /// Story id is not known locally
    #[error("Story not found: '{0}'")]
    StoryNotFound(String),

    /// Credential or config persistence failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SnoozeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// The remote failure behind this error, if it came from the API.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Fetch(e)
            | Self::Submission(e)
            | Self::Deletion(e)
            | Self::Favorite(e)
            | Self::Authentication(e) => Some(e),
            _ => None,
        }
    }

    /// Check if the request never got a response (network, DNS, refused).
    pub fn is_transport(&self) -> bool {
        matches!(self.api_error(), Some(ApiError::Transport(_)))
    }

    /// Check if the server rejected the credentials (401/403).
    pub fn is_auth(&self) -> bool {
        matches!(self.api_error(), Some(ApiError::Auth { .. }))
    }

    /// Check if this is a local validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status carried by the underlying API error, if any.
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(ApiError::status)
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SnoozeError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<toml::de::Error> for SnoozeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, SnoozeError>`.
pub type Result<T> = std::result::Result<T, SnoozeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let err = SnoozeError::Submission(ApiError::Transport("connection refused".into()));
        assert!(err.is_transport());
        assert!(!err.is_auth());
        assert_eq!(err.status(), None);

        let err = SnoozeError::Authentication(ApiError::from_status(401, "Invalid password"));
        assert!(err.is_auth());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_local_errors_have_no_api_error() {
        assert!(SnoozeError::validation("title is empty").api_error().is_none());
        assert!(SnoozeError::NotLoggedIn.api_error().is_none());
        assert!(SnoozeError::validation("x").is_validation());
    }

    #[test]
    fn test_display_includes_cause() {
        let err = SnoozeError::Deletion(ApiError::from_status(404, "No such story"));
        assert_eq!(
            err.to_string(),
            "Deleting the story failed: HTTP 404: No such story"
        );
    }
}
