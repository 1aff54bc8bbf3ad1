//! Application layer for Snooze.
//!
//! `Session` ties the domain types to a story API and a credential slot;
//! `bootstrap::start` builds one at program start.

pub mod bootstrap;
pub mod session;

pub use bootstrap::{StartupReport, start};
pub use session::{Session, SessionState, StarState};
