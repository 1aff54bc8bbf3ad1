//! Infrastructure for the Snooze client: the reqwest-backed API client,
//! file locations, and TOML-backed configuration and credential storage.

pub mod config_service;
pub mod credential_store;
pub mod http_story_api;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::credential_store::TomlCredentialStore;
pub use crate::http_story_api::HttpStoryApi;
pub use crate::paths::SnoozePaths;
