//! Domain core of the Snooze client.
//!
//! Holds the story and user models, the `StoryApi` boundary they are
//! synchronized against, and the `CredentialStore` interface used for
//! session restore. No I/O implementations live here.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod story;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export common types
pub use error::{Result, SnoozeError};
