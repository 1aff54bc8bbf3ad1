//! Creating a `User`: signup, login and session restore.

use super::model::User;
use crate::api::StoryApi;
use crate::error::{Result, SnoozeError};
use crate::story::StoryStore;

impl User {
    /// Registers a new account and returns the logged-in user.
    ///
    /// Stories referenced by the account are added to `store`.
    pub async fn signup(
        api: &dyn StoryApi,
        store: &mut StoryStore,
        name: &str,
        username: &str,
        password: &str,
    ) -> Result<User> {
        let payload = api.signup(name, username, password).await.map_err(|e| {
            tracing::warn!("[Auth] Signing up '{}' failed: {}", username, e);
            SnoozeError::Authentication(e)
        })?;

        tracing::info!("[Auth] Signed up '{}'", payload.user.username);
        Ok(Self::from_record(payload.user, payload.token, store))
    }

    /// Logs in an existing account.
    pub async fn login(
        api: &dyn StoryApi,
        store: &mut StoryStore,
        username: &str,
        password: &str,
    ) -> Result<User> {
        let payload = api.login(username, password).await.map_err(|e| {
            tracing::warn!("[Auth] Login for '{}' failed: {}", username, e);
            SnoozeError::Authentication(e)
        })?;

        tracing::info!("[Auth] Logged in '{}'", payload.user.username);
        Ok(Self::from_record(payload.user, payload.token, store))
    }

    /// Rebuilds the user from previously stored `{token, username}`.
    ///
    /// An expired or revoked token surfaces as an `Auth` API error.
    pub async fn restore_session(
        api: &dyn StoryApi,
        store: &mut StoryStore,
        token: &str,
        username: &str,
    ) -> Result<User> {
        let record = api.get_user(token, username).await.map_err(|e| {
            tracing::warn!("[Auth] Restoring session for '{}' failed: {}", username, e);
            SnoozeError::Authentication(e)
        })?;

        tracing::info!("[Auth] Restored session for '{}'", record.username);
        Ok(Self::from_record(record, token.to_string(), store))
    }
}
