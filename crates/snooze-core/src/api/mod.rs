//! Remote API boundary.
//!
//! This module defines the interface the domain model uses to talk to the
//! Hack or Snooze REST service, the plain records it exchanges, and the
//! error taxonomy for remote failures.
//!
//! # Module Structure
//!
//! - `records`: wire-level request and response shapes
//! - `error`: `ApiError`
//!
//! The HTTP implementation lives in `snooze-infrastructure`.

mod error;
mod records;

pub use error::{ApiError, ApiResult};
pub use records::{
    AuthPayload, FavoriteResponse, LoginFields, LoginRequest, MessageResponse, NewStoryRequest,
    SignupFields, SignupRequest, StoriesResponse, StoryRecord, StoryResponse, TokenBody,
    UserRecord, UserResponse,
};

use crate::story::StoryDraft;
use async_trait::async_trait;

/// Default base endpoint of the hosted API.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

/// Client for the story-sharing REST API.
///
/// Every method is a single request/response round trip with no retry and
/// no caching. Failures are returned, never logged-and-dropped.
///
/// Token placement differs per verb and must match the service exactly:
/// POST bodies carry `token`, GET/DELETE carry it as a `?token=` query
/// parameter.
#[async_trait]
pub trait StoryApi: Send + Sync {
    /// `GET /stories`
    async fn list_stories(&self) -> ApiResult<Vec<StoryRecord>>;

    /// `POST /stories` with `{token, story}` in the body.
    async fn create_story(&self, token: &str, draft: &StoryDraft) -> ApiResult<StoryRecord>;

    /// `DELETE /stories/{id}?token=`. Returns the server message.
    async fn delete_story(&self, token: &str, story_id: &str) -> ApiResult<String>;

    /// `POST /signup`
    async fn signup(&self, name: &str, username: &str, password: &str) -> ApiResult<AuthPayload>;

    /// `POST /login`
    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthPayload>;

    /// `GET /users/{username}?token=`
    async fn get_user(&self, token: &str, username: &str) -> ApiResult<UserRecord>;

    /// `POST /users/{username}/favorites/{storyId}` with `{token}` in the body.
    async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> ApiResult<FavoriteResponse>;

    /// `DELETE /users/{username}/favorites/{storyId}?token=`
    async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> ApiResult<FavoriteResponse>;
}
