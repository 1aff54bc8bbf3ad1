//! Story domain module.
//!
//! # Module Structure
//!
//! - `model`: `Story` and its identifier `StoryId`
//! - `draft`: `StoryDraft`, the user input for a new story
//! - `store`: `StoryStore`, the single map of every story the session knows
//! - `collection`: `StoryCollection`, the ordered listing of all stories
//!
//! Listings and the user's own/favorite sets hold `StoryId`s only; the
//! `Story` values themselves live in one `StoryStore`.

mod collection;
mod draft;
mod model;
mod store;

// Re-export public API
pub use collection::StoryCollection;
pub use draft::StoryDraft;
pub use model::{Story, StoryId};
pub use store::StoryStore;
