//! Persisted credentials.
//!
//! Only the `{token, username}` pair outlives a session; the `User` itself
//! is always rebuilt from the API.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token and username needed to restore a session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub username: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Durable slot holding at most one `Credentials` value.
///
/// Implementations must never log the token.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credentials, `None` when the slot is empty.
    fn load(&self) -> Result<Option<Credentials>>;

    /// Replaces the stored credentials.
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Empties the slot. Clearing an empty slot succeeds.
    fn clear(&self) -> Result<()>;
}
