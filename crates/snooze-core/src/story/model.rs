//! Story domain model.

use crate::api::StoryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Server-assigned story identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single story. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    story_id: StoryId,
    title: String,
    author: String,
    url: String,
    username: String,
    created_at: String,
}

impl Story {
    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Username of the submitter.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Creation timestamp exactly as the server sent it.
    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Creation timestamp parsed as RFC 3339, when it is one.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Host part of the story url, e.g. `x.com` for `http://x.com/a`.
    ///
    /// `None` when the url does not parse or has no host.
    pub fn hostname(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            story_id: StoryId(record.story_id),
            title: record.title,
            author: record.author,
            url: record.url,
            username: record.username,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, created_at: &str) -> StoryRecord {
        StoryRecord {
            story_id: "1".to_string(),
            title: "A".to_string(),
            author: "a".to_string(),
            url: url.to_string(),
            username: "u".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_hostname() {
        let story = Story::from(record("http://x.com", "t1"));
        assert_eq!(story.hostname().as_deref(), Some("x.com"));

        let story = Story::from(record("https://news.example.org/a/b?c=d", "t1"));
        assert_eq!(story.hostname().as_deref(), Some("news.example.org"));
    }

    #[test]
    fn test_hostname_of_invalid_url() {
        let story = Story::from(record("not a url", "t1"));
        assert_eq!(story.hostname(), None);
    }

    #[test]
    fn test_created_at_utc() {
        let story = Story::from(record("http://x.com", "2024-03-01T12:30:00.000Z"));
        let parsed = story.created_at_utc().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T12:30:00+00:00");

        let story = Story::from(record("http://x.com", "t1"));
        assert!(story.created_at_utc().is_none());
        assert_eq!(story.created_at(), "t1");
    }

    #[test]
    fn test_story_id_conversions() {
        let id = StoryId::from("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(id, StoryId::new(String::from("abc")));
    }
}
