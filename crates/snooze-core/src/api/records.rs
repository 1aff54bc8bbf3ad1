//! Wire-level records.
//!
//! These mirror the JSON the service sends and accepts. They are plain data;
//! conversion into domain objects happens in `story` and `user`.

use crate::story::StoryDraft;
use serde::{Deserialize, Serialize};

/// A story as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub created_at: String,
}

/// A user as returned by the API.
///
/// `stories` are the stories the user submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub favorites: Vec<StoryRecord>,
    #[serde(default)]
    pub stories: Vec<StoryRecord>,
}

/// `{user, token}` from signup and login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    pub user: UserRecord,
    pub token: String,
}

/// `{stories}` from `GET /stories`.
#[derive(Debug, Deserialize)]
pub struct StoriesResponse {
    pub stories: Vec<StoryRecord>,
}

/// `{story}` from `POST /stories`.
#[derive(Debug, Deserialize)]
pub struct StoryResponse {
    pub story: StoryRecord,
}

/// `{message}` from `DELETE /stories/{id}`.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// `{user}` from `GET /users/{username}`.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user: UserRecord,
}

/// `{message, user}` from the favorite endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FavoriteResponse {
    #[serde(default)]
    pub message: String,
    pub user: UserRecord,
}

/// Body of `POST /signup`: `{user: {name, username, password}}`.
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub user: SignupFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct SignupFields<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> SignupRequest<'a> {
    pub fn new(name: &'a str, username: &'a str, password: &'a str) -> Self {
        Self {
            user: SignupFields {
                name,
                username,
                password,
            },
        }
    }
}

/// Body of `POST /login`: `{user: {username, password}}`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub user: LoginFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct LoginFields<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self {
            user: LoginFields { username, password },
        }
    }
}

/// Body of `POST /stories`: `{token, story: {title, author, url}}`.
#[derive(Debug, Serialize)]
pub struct NewStoryRequest<'a> {
    pub token: &'a str,
    pub story: &'a StoryDraft,
}

/// Body of `POST /users/{username}/favorites/{storyId}`: `{token}`.
#[derive(Debug, Serialize)]
pub struct TokenBody<'a> {
    pub token: &'a str,
}
