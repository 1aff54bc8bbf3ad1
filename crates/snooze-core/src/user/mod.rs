//! User domain module.
//!
//! This module contains the current-user model and its remote operations.
//!
//! # Module Structure
//!
//! - `model`: `User`, the authenticated session's user
//! - `auth`: signup, login and session restore (the only ways to get a `User`)
//! - `favorites`: adding and removing favorite stories
//!
//! # Usage
//!
//! ```ignore
//! use snooze_core::user::User;
//!
//! let user = User::login(api, &mut store, "bob", "pw").await?;
//! ```

mod auth;
mod favorites;
mod model;

// Re-export public API
pub use model::User;
