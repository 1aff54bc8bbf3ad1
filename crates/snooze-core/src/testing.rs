//! In-memory fakes for tests.
//!
//! `FakeStoryApi` behaves like the hosted service (token checks, ownership
//! checks, server-assigned ids) and can be told to fail the next call.
//! `MemoryCredentialStore` is a credential slot that lives in memory.

use crate::api::{
    ApiError, ApiResult, AuthPayload, FavoriteResponse, StoryApi, StoryRecord, UserRecord,
};
use crate::credentials::{CredentialStore, Credentials};
use crate::error::{Result, SnoozeError};
use crate::story::StoryDraft;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
struct Account {
    password: String,
    name: String,
    created_at: String,
    favorites: Vec<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    /// Newest first, like the real listing
    stories: Vec<StoryRecord>,
    accounts: HashMap<String, Account>,
    /// token -> username
    tokens: HashMap<String, String>,
    next_id: u64,
    failures: VecDeque<ApiError>,
    calls: usize,
}

impl FakeState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn issue_token(&mut self, username: &str) -> String {
        let token = format!("token-{}-{}", username, self.next_id());
        self.tokens.insert(token.clone(), username.to_string());
        token
    }

    /// Counts the call and pops an injected failure, if any.
    fn begin(&mut self) -> ApiResult<()> {
        self.calls += 1;
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn authenticate(&self, token: &str) -> ApiResult<String> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| ApiError::from_status(401, "Invalid token"))
    }

    fn authorize(&self, token: &str, username: &str) -> ApiResult<()> {
        if self.authenticate(token)? == username {
            Ok(())
        } else {
            Err(ApiError::from_status(401, "Token does not match user"))
        }
    }

    fn user_record(&self, username: &str) -> ApiResult<UserRecord> {
        let account = self
            .accounts
            .get(username)
            .ok_or_else(|| ApiError::from_status(404, format!("No user '{}'", username)))?;

        let favorites = account
            .favorites
            .iter()
            .filter_map(|id| self.stories.iter().find(|s| s.story_id == *id).cloned())
            .collect();
        let stories = self
            .stories
            .iter()
            .filter(|s| s.username == username)
            .cloned()
            .collect();

        Ok(UserRecord {
            username: username.to_string(),
            name: account.name.clone(),
            created_at: account.created_at.clone(),
            favorites,
            stories,
        })
    }

    fn favorite_response(&self, username: &str, message: &str) -> ApiResult<FavoriteResponse> {
        Ok(FavoriteResponse {
            message: message.to_string(),
            user: self.user_record(username)?,
        })
    }
}

/// In-memory stand-in for the story-sharing service.
#[derive(Debug, Default)]
pub struct FakeStoryApi {
    state: Mutex<FakeState>,
}

impl FakeStoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an account.
    pub fn with_user(self, username: &str, password: &str, name: &str) -> Self {
        self.state().accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                name: name.to_string(),
                created_at: "2024-01-01T00:00:00.000Z".to_string(),
                favorites: Vec::new(),
            },
        );
        self
    }

    /// Appends a story to the listing (older than those already added).
    pub fn with_story(self, story_id: &str, title: &str, url: &str, username: &str) -> Self {
        self.with_story_record(StoryRecord {
            story_id: story_id.to_string(),
            title: title.to_string(),
            author: format!("{} author", username),
            url: url.to_string(),
            username: username.to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        })
    }

    pub fn with_story_record(self, record: StoryRecord) -> Self {
        self.state().stories.push(record);
        self
    }

    /// Marks a favorite server-side without going through the API.
    pub fn mark_favorite(&self, username: &str, story_id: &str) {
        if let Some(account) = self.state().accounts.get_mut(username) {
            account.favorites.push(story_id.to_string());
        }
    }

    /// Issues a valid token for `username`, as a prior login would have.
    pub fn token_for(&self, username: &str) -> String {
        self.state().issue_token(username)
    }

    /// Makes the next call fail with `err`. Queued failures are consumed in order.
    pub fn fail_next(&self, err: ApiError) {
        self.state().failures.push_back(err);
    }

    /// Number of API calls made so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.state().calls
    }

    pub fn favorites_of(&self, username: &str) -> Vec<String> {
        self.state()
            .accounts
            .get(username)
            .map(|a| a.favorites.clone())
            .unwrap_or_default()
    }

    pub fn story_ids(&self) -> Vec<String> {
        self.state().stories.iter().map(|s| s.story_id.clone()).collect()
    }
}

#[async_trait]
impl StoryApi for FakeStoryApi {
    async fn list_stories(&self) -> ApiResult<Vec<StoryRecord>> {
        let mut state = self.state();
        state.begin()?;
        Ok(state.stories.clone())
    }

    async fn create_story(&self, token: &str, draft: &StoryDraft) -> ApiResult<StoryRecord> {
        let mut state = self.state();
        state.begin()?;
        let username = state.authenticate(token)?;

        let id = state.next_id();
        let record = StoryRecord {
            story_id: format!("story-{}", id),
            title: draft.title.clone(),
            author: draft.author.clone(),
            url: draft.url.clone(),
            username,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        state.stories.insert(0, record.clone());
        Ok(record)
    }

    async fn delete_story(&self, token: &str, story_id: &str) -> ApiResult<String> {
        let mut state = self.state();
        state.begin()?;
        let username = state.authenticate(token)?;

        let owner = state
            .stories
            .iter()
            .find(|s| s.story_id == story_id)
            .map(|s| s.username.clone())
            .ok_or_else(|| ApiError::from_status(404, format!("No story '{}'", story_id)))?;
        if owner != username {
            return Err(ApiError::from_status(403, "Only the submitter can delete a story"));
        }

        state.stories.retain(|s| s.story_id != story_id);
        for account in state.accounts.values_mut() {
            account.favorites.retain(|id| id != story_id);
        }
        Ok("Deleted story".to_string())
    }

    async fn signup(&self, name: &str, username: &str, password: &str) -> ApiResult<AuthPayload> {
        let mut state = self.state();
        state.begin()?;
        if state.accounts.contains_key(username) {
            return Err(ApiError::from_status(409, format!("Username '{}' taken", username)));
        }

        state.accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                name: name.to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
                favorites: Vec::new(),
            },
        );
        let token = state.issue_token(username);
        Ok(AuthPayload {
            user: state.user_record(username)?,
            token,
        })
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthPayload> {
        let mut state = self.state();
        state.begin()?;
        let valid = state
            .accounts
            .get(username)
            .is_some_and(|a| a.password == password);
        if !valid {
            return Err(ApiError::from_status(401, "Invalid username or password"));
        }

        let token = state.issue_token(username);
        Ok(AuthPayload {
            user: state.user_record(username)?,
            token,
        })
    }

    async fn get_user(&self, token: &str, username: &str) -> ApiResult<UserRecord> {
        let mut state = self.state();
        state.begin()?;
        state.authorize(token, username)?;
        state.user_record(username)
    }

    async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> ApiResult<FavoriteResponse> {
        let mut state = self.state();
        state.begin()?;
        state.authorize(token, username)?;
        if !state.stories.iter().any(|s| s.story_id == story_id) {
            return Err(ApiError::from_status(404, format!("No story '{}'", story_id)));
        }

        if let Some(account) = state.accounts.get_mut(username)
            && !account.favorites.iter().any(|id| id == story_id)
        {
            account.favorites.push(story_id.to_string());
        }
        state.favorite_response(username, "Favorite Added!")
    }

    async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> ApiResult<FavoriteResponse> {
        let mut state = self.state();
        state.begin()?;
        state.authorize(token, username)?;

        if let Some(account) = state.accounts.get_mut(username) {
            account.favorites.retain(|id| id != story_id);
        }
        state.favorite_response(username, "Favorite Removed!")
    }
}

/// Credential slot kept in memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credentials>>,
    fail_writes: Mutex<bool>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            slot: Mutex::new(Some(credentials)),
            fail_writes: Mutex::new(false),
        }
    }

    /// Makes `save` and `clear` fail from now on.
    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    /// Current slot contents, bypassing the trait.
    pub fn current(&self) -> Option<Credentials> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn check_writable(&self) -> Result<()> {
        if *self.fail_writes.lock().unwrap_or_else(PoisonError::into_inner) {
            Err(SnoozeError::storage("credential slot is read-only"))
        } else {
            Ok(())
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.current())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        self.check_writable()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.check_writable()?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
