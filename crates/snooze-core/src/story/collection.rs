//! The listing of all stories.

use super::draft::StoryDraft;
use super::model::{Story, StoryId};
use super::store::StoryStore;
use crate::api::StoryApi;
use crate::error::{Result, SnoozeError};
use crate::user::User;

/// Ordered listing of stories, newest first, without duplicate ids.
///
/// Mutations call the API first and touch local state only on success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryCollection {
    listing: Vec<StoryId>,
}

impl StoryCollection {
    /// An empty listing, e.g. the fallback when fetching fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetches the current story list and registers every story in `store`.
    ///
    /// If the payload repeats a story id, the first occurrence wins.
    pub async fn fetch_all(api: &dyn StoryApi, store: &mut StoryStore) -> Result<Self> {
        let records = api.list_stories().await.map_err(|e| {
            tracing::warn!("[Stories] Getting the list of stories failed: {}", e);
            SnoozeError::Fetch(e)
        })?;

        let mut listing: Vec<StoryId> = Vec::with_capacity(records.len());
        for record in records {
            let story = Story::from(record);
            if listing.contains(story.story_id()) {
                tracing::debug!("[Stories] Skipping duplicate story '{}'", story.story_id());
                continue;
            }
            listing.push(store.insert(story));
        }

        tracing::debug!("[Stories] Fetched {} stories", listing.len());
        Ok(Self { listing })
    }

    /// Submits `draft` as `user` and prepends the new story to this listing
    /// and to the user's own stories.
    pub async fn add(
        &mut self,
        api: &dyn StoryApi,
        store: &mut StoryStore,
        user: &mut User,
        draft: &StoryDraft,
    ) -> Result<Story> {
        draft.validate()?;

        let record = api
            .create_story(user.login_token(), draft)
            .await
            .map_err(|e| {
                tracing::warn!("[Stories] Adding a new story failed: {}", e);
                SnoozeError::Submission(e)
            })?;

        let story = Story::from(record);
        let id = store.insert(story.clone());
        self.listing.retain(|existing| *existing != id);
        self.listing.insert(0, id.clone());
        user.prepend_own_story(id);

        tracing::info!("[Stories] Added '{}' ({})", story.title(), story.story_id());
        Ok(story)
    }

    /// Deletes a story remotely, then drops it from this listing, from the
    /// user's own stories and favorites, and from `store`.
    pub async fn remove(
        &mut self,
        api: &dyn StoryApi,
        store: &mut StoryStore,
        user: &mut User,
        story_id: &StoryId,
    ) -> Result<()> {
        let message = api
            .delete_story(user.login_token(), story_id.as_str())
            .await
            .map_err(|e| {
                tracing::warn!("[Stories] Removing '{}' failed: {}", story_id, e);
                SnoozeError::Deletion(e)
            })?;
        tracing::debug!("[Stories] {}", message);

        self.listing.retain(|id| id != story_id);
        user.forget_story(story_id);
        store.remove(story_id);

        tracing::info!("[Stories] Removed '{}'", story_id);
        Ok(())
    }

    pub fn ids(&self) -> &[StoryId] {
        &self.listing
    }

    pub fn stories<'a>(&self, store: &'a StoryStore) -> Vec<&'a Story> {
        store.resolve(&self.listing)
    }

    pub fn contains(&self, story_id: &StoryId) -> bool {
        self.listing.contains(story_id)
    }

    pub fn len(&self) -> usize {
        self.listing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }
}
