//! Source-of-truth map of stories keyed by id.

use super::model::{Story, StoryId};
use std::collections::HashMap;

/// Every story the session currently knows about.
///
/// The story listing and the user's own/favorite sets refer into this
/// store by `StoryId`, so a story value exists exactly once.
#[derive(Debug, Clone, Default)]
pub struct StoryStore {
    stories: HashMap<StoryId, Story>,
}

impl StoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a story, returning its id.
    pub fn insert(&mut self, story: Story) -> StoryId {
        let id = story.story_id().clone();
        self.stories.insert(id.clone(), story);
        id
    }

    pub fn get(&self, id: &StoryId) -> Option<&Story> {
        self.stories.get(id)
    }

    pub fn contains(&self, id: &StoryId) -> bool {
        self.stories.contains_key(id)
    }

    pub fn remove(&mut self, id: &StoryId) -> Option<Story> {
        self.stories.remove(id)
    }

    /// Resolves ids in order, skipping any the store no longer holds.
    pub fn resolve<'a>(&'a self, ids: &[StoryId]) -> Vec<&'a Story> {
        ids.iter().filter_map(|id| self.stories.get(id)).collect()
    }

    /// Drops every story for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&StoryId) -> bool) {
        self.stories.retain(|id, _| keep(id));
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StoryRecord;

    fn story(id: &str, title: &str) -> Story {
        Story::from(StoryRecord {
            story_id: id.to_string(),
            title: title.to_string(),
            author: "a".to_string(),
            url: "http://x.com".to_string(),
            username: "u".to_string(),
            created_at: "t".to_string(),
        })
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut store = StoryStore::new();
        store.insert(story("1", "old"));
        store.insert(story("1", "new"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&StoryId::from("1")).unwrap().title(), "new");
    }

    #[test]
    fn test_resolve_skips_missing_ids() {
        let mut store = StoryStore::new();
        store.insert(story("1", "one"));
        store.insert(story("2", "two"));

        let ids = vec![StoryId::from("2"), StoryId::from("9"), StoryId::from("1")];
        let titles: Vec<_> = store.resolve(&ids).iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["two", "one"]);
    }

    #[test]
    fn test_retain() {
        let mut store = StoryStore::new();
        store.insert(story("1", "one"));
        store.insert(story("2", "two"));

        store.retain(|id| id.as_str() == "2");
        assert!(!store.contains(&StoryId::from("1")));
        assert!(store.contains(&StoryId::from("2")));
    }
}
