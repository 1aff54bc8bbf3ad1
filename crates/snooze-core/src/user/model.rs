//! User domain model.
//!
//! Represents the one logged-in user of a session. Own stories and
//! favorites are kept as story ids and resolved through a `StoryStore`.

use crate::api::UserRecord;
use crate::credentials::Credentials;
use crate::story::{Story, StoryId, StoryStore};
use std::fmt;

/// The current authenticated user.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    name: String,
    created_at: String,
    /// Insertion-ordered, no duplicates
    favorites: Vec<StoryId>,
    /// Newest first
    own_stories: Vec<StoryId>,
    login_token: String,
}

impl User {
    /// Builds a user from an API record, registering the stories it
    /// references in `store`.
    pub(crate) fn from_record(record: UserRecord, token: String, store: &mut StoryStore) -> Self {
        let mut user = Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            favorites: Vec::with_capacity(record.favorites.len()),
            own_stories: Vec::with_capacity(record.stories.len()),
            login_token: token,
        };

        for story in record.stories {
            let id = store.insert(Story::from(story));
            push_unique(&mut user.own_stories, id);
        }
        for story in record.favorites {
            let id = store.insert(Story::from(story));
            push_unique(&mut user.favorites, id);
        }

        user
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn login_token(&self) -> &str {
        &self.login_token
    }

    /// The `{token, username}` pair persisted for session restore.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.login_token.clone(), self.username.clone())
    }

    pub fn favorite_ids(&self) -> &[StoryId] {
        &self.favorites
    }

    pub fn own_story_ids(&self) -> &[StoryId] {
        &self.own_stories
    }

    pub fn favorites<'a>(&self, store: &'a StoryStore) -> Vec<&'a Story> {
        store.resolve(&self.favorites)
    }

    pub fn own_stories<'a>(&self, store: &'a StoryStore) -> Vec<&'a Story> {
        store.resolve(&self.own_stories)
    }

    /// Membership test over favorites.
    pub fn is_favorite_story(&self, story_id: &StoryId) -> bool {
        self.favorites.contains(story_id)
    }

    pub fn is_own_story(&self, story_id: &StoryId) -> bool {
        self.own_stories.contains(story_id)
    }

    /// Whether this user still refers to `story_id` from either set.
    pub fn references(&self, story_id: &StoryId) -> bool {
        self.is_favorite_story(story_id) || self.is_own_story(story_id)
    }

    pub(crate) fn prepend_own_story(&mut self, story_id: StoryId) {
        self.own_stories.retain(|id| *id != story_id);
        self.own_stories.insert(0, story_id);
    }

    pub(crate) fn push_favorite(&mut self, story_id: StoryId) {
        push_unique(&mut self.favorites, story_id);
    }

    pub(crate) fn drop_favorite(&mut self, story_id: &StoryId) {
        self.favorites.retain(|id| id != story_id);
    }

    /// Removes `story_id` from both own stories and favorites.
    pub(crate) fn forget_story(&mut self, story_id: &StoryId) {
        self.own_stories.retain(|id| id != story_id);
        self.drop_favorite(story_id);
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .field("favorites", &self.favorites)
            .field("own_stories", &self.own_stories)
            .field("login_token", &"<redacted>")
            .finish()
    }
}

fn push_unique(ids: &mut Vec<StoryId>, id: StoryId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StoryRecord;

    fn record(id: &str) -> StoryRecord {
        StoryRecord {
            story_id: id.to_string(),
            title: format!("Story {}", id),
            author: "a".to_string(),
            url: "http://x.com".to_string(),
            username: "bob".to_string(),
            created_at: "t".to_string(),
        }
    }

    fn user_record() -> UserRecord {
        UserRecord {
            username: "bob".to_string(),
            name: "Bob".to_string(),
            created_at: "t0".to_string(),
            favorites: vec![record("2"), record("3"), record("2")],
            stories: vec![record("1"), record("2")],
        }
    }

    #[test]
    fn test_from_record_registers_stories() {
        let mut store = StoryStore::new();
        let user = User::from_record(user_record(), "tok".to_string(), &mut store);

        assert_eq!(store.len(), 3);
        assert_eq!(user.own_story_ids(), &[StoryId::from("1"), StoryId::from("2")]);
        assert_eq!(user.favorite_ids(), &[StoryId::from("2"), StoryId::from("3")]);
        assert_eq!(user.favorites(&store).len(), 2);
        assert!(user.is_favorite_story(&StoryId::from("3")));
        assert!(!user.is_favorite_story(&StoryId::from("1")));
    }

    #[test]
    fn test_credentials_and_debug_redaction() {
        let mut store = StoryStore::new();
        let user = User::from_record(user_record(), "secret-token".to_string(), &mut store);

        assert_eq!(user.credentials(), Credentials::new("secret-token", "bob"));
        assert!(!format!("{:?}", user).contains("secret-token"));
    }

    #[test]
    fn test_forget_story() {
        let mut store = StoryStore::new();
        let mut user = User::from_record(user_record(), "tok".to_string(), &mut store);

        user.forget_story(&StoryId::from("2"));
        assert!(!user.references(&StoryId::from("2")));
        assert!(user.references(&StoryId::from("1")));
        assert!(user.references(&StoryId::from("3")));
    }
}
