//! New-story input.

use crate::error::{Result, SnoozeError};
use serde::{Deserialize, Serialize};
use url::Url;

/// Fields a user fills in to submit a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}

impl StoryDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    /// Rejects input the server would refuse anyway, before any request.
    ///
    /// Checks that no field is blank and that `url` is an absolute http(s) url.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("url", &self.url),
        ] {
            if value.trim().is_empty() {
                return Err(SnoozeError::validation(format!("{} must not be empty", field)));
            }
        }

        let url = Url::parse(self.url.trim())
            .map_err(|e| SnoozeError::validation(format!("url '{}' is invalid: {}", self.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SnoozeError::validation(format!(
                "url '{}' must use http or https",
                self.url
            )));
        }

        Ok(())
    }
}
