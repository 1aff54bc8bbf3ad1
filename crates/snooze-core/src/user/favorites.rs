//! Favorite stories.
//!
//! Both operations are idempotent: favoriting a story that already is a
//! favorite, or unfavoriting one that is not, returns `Ok(())` without a
//! remote call. Callers toggling a star can still branch on
//! `is_favorite_story` first.

use super::model::User;
use crate::api::StoryApi;
use crate::error::{Result, SnoozeError};
use crate::story::{StoryId, StoryStore};

impl User {
    /// Marks `story_id` as a favorite, remotely first, then locally.
    ///
    /// The story must be known to `store`.
    pub async fn add_favorite(
        &mut self,
        api: &dyn StoryApi,
        store: &StoryStore,
        story_id: &StoryId,
    ) -> Result<()> {
        if self.is_favorite_story(story_id) {
            tracing::debug!("[Favorites] '{}' already a favorite", story_id);
            return Ok(());
        }
        if !store.contains(story_id) {
            return Err(SnoozeError::StoryNotFound(story_id.to_string()));
        }

        let response = api
            .add_favorite(self.login_token(), self.username(), story_id.as_str())
            .await
            .map_err(|e| {
                tracing::warn!("[Favorites] Adding '{}' failed: {}", story_id, e);
                SnoozeError::Favorite(e)
            })?;
        tracing::debug!("[Favorites] {}", response.message);

        self.push_favorite(story_id.clone());
        Ok(())
    }

    /// Removes `story_id` from favorites, remotely first, then locally.
    pub async fn remove_favorite(&mut self, api: &dyn StoryApi, story_id: &StoryId) -> Result<()> {
        if !self.is_favorite_story(story_id) {
            tracing::debug!("[Favorites] '{}' is not a favorite", story_id);
            return Ok(());
        }

        let response = api
            .remove_favorite(self.login_token(), self.username(), story_id.as_str())
            .await
            .map_err(|e| {
                tracing::warn!("[Favorites] Removing '{}' failed: {}", story_id, e);
                SnoozeError::Favorite(e)
            })?;
        tracing::debug!("[Favorites] {}", response.message);

        self.drop_favorite(story_id);
        Ok(())
    }
}
