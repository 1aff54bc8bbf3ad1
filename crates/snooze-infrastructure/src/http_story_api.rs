//! HttpStoryApi - REST implementation of `StoryApi` over reqwest.
//!
//! One request per call: no retry, no caching, no timeout override. The
//! token is put exactly where the service expects it (body for POST, query
//! for GET/DELETE) and is never logged.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use snooze_core::SnoozeError;
use snooze_core::api::{
    ApiError, ApiResult, AuthPayload, FavoriteResponse, LoginRequest, MessageResponse,
    NewStoryRequest, SignupRequest, StoriesResponse, StoryApi, StoryRecord, StoryResponse,
    TokenBody, UserRecord, UserResponse,
};
use snooze_core::config::ClientConfig;
use snooze_core::story::StoryDraft;
use url::Url;

/// Longest server body echoed into an error message.
const MAX_ERROR_BODY: usize = 200;

/// `StoryApi` backed by the hosted REST service.
#[derive(Clone)]
pub struct HttpStoryApi {
    client: Client,
    base_url: Url,
}

impl HttpStoryApi {
    /// Creates a client for `base_url` with a default reqwest `Client`.
    pub fn new(base_url: &str) -> Result<Self, SnoozeError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client from the effective configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SnoozeError> {
        Self::new(&config.validated_base_url()?)
    }

    /// Uses a preconfigured reqwest `Client` (proxy settings, test setups).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, SnoozeError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SnoozeError::config(format!("base_url '{}' is invalid: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(SnoozeError::config(format!(
                "base_url '{}' cannot hold paths",
                base_url
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base url, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request and decodes a 2xx JSON body into `T`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = server_message(status, &body);
            tracing::debug!("[Api] HTTP {}: {}", status.as_u16(), message);
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Extracts a human-readable message from an error response body.
///
/// The service answers errors with `{"error": {"status", "title", "message"}}`;
/// other JSON shapes and plain text are accepted too.
pub fn server_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        let message = value
            .pointer("/error/message")
            .or_else(|| value.get("message"))
            .or_else(|| value.get("error"))
            .and_then(|v| v.as_str());
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();
    }
    text.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl StoryApi for HttpStoryApi {
    async fn list_stories(&self) -> ApiResult<Vec<StoryRecord>> {
        let url = self.endpoint(&["stories"]);
        tracing::debug!("[Api] GET {}", url);

        let response: StoriesResponse = self.send(self.client.get(url)).await?;
        Ok(response.stories)
    }

    async fn create_story(&self, token: &str, draft: &StoryDraft) -> ApiResult<StoryRecord> {
        let url = self.endpoint(&["stories"]);
        tracing::debug!("[Api] POST {}", url);

        let body = NewStoryRequest { token, story: draft };
        let response: StoryResponse = self.send(self.client.post(url).json(&body)).await?;
        Ok(response.story)
    }

    async fn delete_story(&self, token: &str, story_id: &str) -> ApiResult<String> {
        let url = self.endpoint(&["stories", story_id]);
        tracing::debug!("[Api] DELETE {}", url);

        let request = self.client.delete(url).query(&[("token", token)]);
        let response: MessageResponse = self.send(request).await?;
        Ok(response.message)
    }

    async fn signup(&self, name: &str, username: &str, password: &str) -> ApiResult<AuthPayload> {
        let url = self.endpoint(&["signup"]);
        tracing::debug!("[Api] POST {}", url);

        let body = SignupRequest::new(name, username, password);
        self.send(self.client.post(url).json(&body)).await
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthPayload> {
        let url = self.endpoint(&["login"]);
        tracing::debug!("[Api] POST {}", url);

        let body = LoginRequest::new(username, password);
        self.send(self.client.post(url).json(&body)).await
    }

    async fn get_user(&self, token: &str, username: &str) -> ApiResult<UserRecord> {
        let url = self.endpoint(&["users", username]);
        tracing::debug!("[Api] GET {}", url);

        let request = self.client.get(url).query(&[("token", token)]);
        let response: UserResponse = self.send(request).await?;
        Ok(response.user)
    }

    async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> ApiResult<FavoriteResponse> {
        let url = self.endpoint(&["users", username, "favorites", story_id]);
        tracing::debug!("[Api] POST {}", url);

        self.send(self.client.post(url).json(&TokenBody { token }))
            .await
    }

    async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> ApiResult<FavoriteResponse> {
        let url = self.endpoint(&["users", username, "favorites", story_id]);
        tracing::debug!("[Api] DELETE {}", url);

        self.send(self.client.delete(url).query(&[("token", token)]))
            .await
    }
}
