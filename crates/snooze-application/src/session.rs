//! Session controller.
//!
//! `Session` owns everything one logged-in (or logged-out) client has: the
//! story store, the story listing and the current user. It is created by
//! [`crate::bootstrap::start`] and replaces page-wide globals.
//!
//! Every mutating method takes `&mut self`, so operations on a session
//! never overlap.

use snooze_core::api::StoryApi;
use snooze_core::credentials::CredentialStore;
use snooze_core::story::{Story, StoryCollection, StoryDraft, StoryId, StoryStore};
use snooze_core::user::User;
use snooze_core::{Result, SnoozeError};
use std::sync::Arc;

/// Login state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { username: String },
}

/// Star shown next to a story for the logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarState {
    Favorite,
    NotFavorite,
}

impl StarState {
    pub fn is_favorite(self) -> bool {
        matches!(self, Self::Favorite)
    }
}

pub struct Session {
    api: Arc<dyn StoryApi>,
    credentials: Arc<dyn CredentialStore>,
    store: StoryStore,
    stories: StoryCollection,
    user: Option<User>,
}

impl Session {
    /// A logged-out session with an empty listing.
    pub fn new(api: Arc<dyn StoryApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            api,
            credentials,
            store: StoryStore::new(),
            stories: StoryCollection::empty(),
            user: None,
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.user {
            Some(user) => SessionState::LoggedIn {
                username: user.username().to_string(),
            },
            None => SessionState::LoggedOut,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // ============================================================================
    // Authentication
    // ============================================================================

    /// Creates an account, remembers its credentials and logs it in.
    pub async fn signup(&mut self, name: &str, username: &str, password: &str) -> Result<&User> {
        let mut store = self.store.clone();
        let user = User::signup(self.api.as_ref(), &mut store, name, username, password).await?;
        self.enter(user, store)
    }

    /// Logs in, remembers the credentials and replaces any current user.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let mut store = self.store.clone();
        let user = User::login(self.api.as_ref(), &mut store, username, password).await?;
        self.enter(user, store)
    }

    /// Restores the remembered login, if there is one.
    ///
    /// Returns `Ok(false)` when nothing is remembered. A token the server
    /// rejects is forgotten before the error is returned.
    pub async fn restore(&mut self) -> Result<bool> {
        let Some(saved) = self.credentials.load()? else {
            tracing::debug!("[Session] No remembered credentials");
            return Ok(false);
        };

        let mut store = self.store.clone();
        match User::restore_session(self.api.as_ref(), &mut store, &saved.token, &saved.username)
            .await
        {
            Ok(user) => {
                self.store = store;
                self.user = Some(user);
                Ok(true)
            }
            Err(e) => {
                if e.is_auth() {
                    tracing::info!(
                        "[Session] Remembered credentials for '{}' expired, clearing",
                        saved.username
                    );
                    if let Err(clear_err) = self.credentials.clear() {
                        tracing::warn!(
                            "[Session] Could not clear remembered credentials: {}",
                            clear_err
                        );
                    }
                }
                Err(e)
            }
        }
    }

    /// Ends the session and forgets the remembered credentials.
    pub fn logout(&mut self) -> Result<()> {
        self.credentials.clear()?;
        if let Some(user) = self.user.take() {
            tracing::info!("[Session] Logged out '{}'", user.username());
        }
        self.prune_store();
        Ok(())
    }

    /// Persists credentials, then commits the new user and store.
    fn enter(&mut self, user: User, mut store: StoryStore) -> Result<&User> {
        self.credentials.save(&user.credentials())?;
        prune(&mut store, &self.stories, Some(&user));
        self.store = store;
        Ok(self.user.insert(user))
    }

    // ============================================================================
    // Stories
    // ============================================================================

    /// Re-fetches the story listing. The old listing stays on failure.
    pub async fn refresh_stories(&mut self) -> Result<()> {
        let mut store = self.store.clone();
        let stories = StoryCollection::fetch_all(self.api.as_ref(), &mut store).await?;
        self.store = store;
        self.stories = stories;
        self.prune_store();
        Ok(())
    }

    /// Submits a story as the current user.
    pub async fn add_story(&mut self, draft: &StoryDraft) -> Result<Story> {
        let user = self.user.as_mut().ok_or(SnoozeError::NotLoggedIn)?;
        self.stories
            .add(self.api.as_ref(), &mut self.store, user, draft)
            .await
    }

    /// Deletes one of the current user's stories everywhere.
    pub async fn remove_story(&mut self, story_id: &StoryId) -> Result<()> {
        let user = self.user.as_mut().ok_or(SnoozeError::NotLoggedIn)?;
        self.stories
            .remove(self.api.as_ref(), &mut self.store, user, story_id)
            .await
    }

    // ============================================================================
    // Favorites
    // ============================================================================

    pub async fn add_favorite(&mut self, story_id: &StoryId) -> Result<()> {
        let user = self.user.as_mut().ok_or(SnoozeError::NotLoggedIn)?;
        user.add_favorite(self.api.as_ref(), &self.store, story_id).await
    }

    pub async fn remove_favorite(&mut self, story_id: &StoryId) -> Result<()> {
        let user = self.user.as_mut().ok_or(SnoozeError::NotLoggedIn)?;
        user.remove_favorite(self.api.as_ref(), story_id).await
    }

    /// Flips the favorite state of a story and returns the new star.
    pub async fn toggle_favorite(&mut self, story_id: &StoryId) -> Result<StarState> {
        let user = self.user.as_ref().ok_or(SnoozeError::NotLoggedIn)?;
        if user.is_favorite_story(story_id) {
            self.remove_favorite(story_id).await?;
            Ok(StarState::NotFavorite)
        } else {
            self.add_favorite(story_id).await?;
            Ok(StarState::Favorite)
        }
    }

    // ============================================================================
    // Snapshots
    // ============================================================================

    /// All stories, newest first.
    pub fn stories(&self) -> Vec<&Story> {
        self.stories.stories(&self.store)
    }

    pub fn own_stories(&self) -> Result<Vec<&Story>> {
        let user = self.user.as_ref().ok_or(SnoozeError::NotLoggedIn)?;
        Ok(user.own_stories(&self.store))
    }

    pub fn favorite_stories(&self) -> Result<Vec<&Story>> {
        let user = self.user.as_ref().ok_or(SnoozeError::NotLoggedIn)?;
        Ok(user.favorites(&self.store))
    }

    pub fn story(&self, story_id: &StoryId) -> Option<&Story> {
        self.store.get(story_id)
    }

    /// Star for `story_id`; `None` when logged out.
    pub fn star_for(&self, story_id: &StoryId) -> Option<StarState> {
        self.user.as_ref().map(|user| {
            if user.is_favorite_story(story_id) {
                StarState::Favorite
            } else {
                StarState::NotFavorite
            }
        })
    }

    /// Drops stories nothing refers to anymore.
    fn prune_store(&mut self) {
        prune(&mut self.store, &self.stories, self.user.as_ref());
    }
}

/// Keeps only stories in the listing or referenced by `user`.
fn prune(store: &mut StoryStore, stories: &StoryCollection, user: Option<&User>) {
    store.retain(|id| stories.contains(id) || user.is_some_and(|u| u.references(id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use snooze_core::api::ApiError;
    use snooze_core::credentials::Credentials;
    use snooze_core::testing::{FakeStoryApi, MemoryCredentialStore};

    fn session_with(api: FakeStoryApi) -> (Session, Arc<FakeStoryApi>, Arc<MemoryCredentialStore>) {
        let api = Arc::new(api);
        let credentials = Arc::new(MemoryCredentialStore::new());
        let session = Session::new(api.clone(), credentials.clone());
        (session, api, credentials)
    }

    fn sample_api() -> FakeStoryApi {
        FakeStoryApi::new()
            .with_user("bob", "pw", "Bob")
            .with_story("1", "Bob's", "http://x.com", "bob")
            .with_story("2", "Alice's", "http://y.com", "alice")
    }

    #[tokio::test]
    async fn test_login_persists_credentials() {
        let (mut session, _api, credentials) = session_with(sample_api());

        let user = session.login("bob", "pw").await.unwrap();
        let token = user.login_token().to_string();

        assert_eq!(
            session.state(),
            SessionState::LoggedIn {
                username: "bob".to_string()
            }
        );
        assert_eq!(credentials.current(), Some(Credentials::new(token, "bob")));
    }

    #[tokio::test]
    async fn test_failed_login_stays_logged_out() {
        let (mut session, api, credentials) = session_with(sample_api());
        api.fail_next(ApiError::from_status(401, "Invalid password"));

        let err = session.login("bob", "pw").await.unwrap_err();

        assert!(err.is_auth());
        assert_eq!(session.state(), SessionState::LoggedOut);
        assert_eq!(credentials.current(), None);
    }

    #[tokio::test]
    async fn test_login_fails_when_credentials_cannot_be_saved() {
        let (mut session, _api, credentials) = session_with(sample_api());
        credentials.fail_writes();

        let err = session.login("bob", "pw").await.unwrap_err();

        assert!(matches!(err, SnoozeError::Storage(_)));
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_clears_credentials() {
        let (mut session, _api, credentials) = session_with(sample_api());
        session.login("bob", "pw").await.unwrap();

        session.logout().unwrap();

        assert_eq!(session.state(), SessionState::LoggedOut);
        assert_eq!(credentials.current(), None);
        assert!(matches!(session.own_stories(), Err(SnoozeError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_restore_with_expired_token_clears_credentials() {
        let api = Arc::new(sample_api());
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
            "stale", "bob",
        )));
        let mut session = Session::new(api, credentials.clone());

        let err = session.restore().await.unwrap_err();

        assert!(err.is_auth());
        assert!(!session.is_logged_in());
        assert_eq!(credentials.current(), None);
    }

    #[tokio::test]
    async fn test_restore_transport_failure_keeps_credentials() {
        let api = Arc::new(sample_api());
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
            "tok", "bob",
        )));
        api.fail_next(ApiError::Transport("offline".into()));
        let mut session = Session::new(api, credentials.clone());

        let err = session.restore().await.unwrap_err();

        assert!(err.is_transport());
        assert!(credentials.current().is_some());
    }

    #[tokio::test]
    async fn test_mutations_require_login() {
        let (mut session, _api, _credentials) = session_with(sample_api());
        session.refresh_stories().await.unwrap();
        let id = StoryId::from("2");

        assert_eq!(
            session
                .add_story(&StoryDraft::new("T", "A", "http://z.com"))
                .await
                .unwrap_err(),
            SnoozeError::NotLoggedIn
        );
        assert_eq!(
            session.toggle_favorite(&id).await.unwrap_err(),
            SnoozeError::NotLoggedIn
        );
        assert_eq!(session.star_for(&id), None);
    }

    #[tokio::test]
    async fn test_toggle_favorite() {
        let (mut session, api, _credentials) = session_with(sample_api());
        session.refresh_stories().await.unwrap();
        session.login("bob", "pw").await.unwrap();
        let id = StoryId::from("2");

        assert_eq!(session.star_for(&id), Some(StarState::NotFavorite));
        assert_eq!(session.toggle_favorite(&id).await.unwrap(), StarState::Favorite);
        assert_eq!(session.star_for(&id), Some(StarState::Favorite));
        assert_eq!(api.favorites_of("bob"), vec!["2".to_string()]);

        assert_eq!(
            session.toggle_favorite(&id).await.unwrap(),
            StarState::NotFavorite
        );
        assert!(session.favorite_stories().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_story_updates_every_view() {
        let (mut session, api, _credentials) = session_with(sample_api());
        session.refresh_stories().await.unwrap();
        session.login("bob", "pw").await.unwrap();
        let id = StoryId::from("1");
        session.add_favorite(&id).await.unwrap();

        session.remove_story(&id).await.unwrap();

        assert!(session.stories().iter().all(|s| *s.story_id() != id));
        assert!(session.own_stories().unwrap().is_empty());
        assert!(session.favorite_stories().unwrap().is_empty());
        assert!(session.story(&id).is_none());
        assert_eq!(api.story_ids(), vec!["2".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_listing() {
        let (mut session, api, _credentials) = session_with(sample_api());
        session.refresh_stories().await.unwrap();
        api.fail_next(ApiError::Transport("offline".into()));

        let err = session.refresh_stories().await.unwrap_err();

        assert!(matches!(err, SnoozeError::Fetch(_)));
        assert_eq!(session.stories().len(), 2);
    }

    #[tokio::test]
    async fn test_logout_prunes_user_only_stories() {
        let api = FakeStoryApi::new()
            .with_user("bob", "pw", "Bob")
            .with_story("1", "Bob's", "http://x.com", "bob");
        let (mut session, _api, _credentials) = session_with(api);
        let id = StoryId::from("1");
        session.login("bob", "pw").await.unwrap();
        assert!(session.stories().is_empty());
        assert!(session.story(&id).is_some());

        session.logout().unwrap();

        assert!(session.story(&id).is_none());
    }

    #[tokio::test]
    async fn test_login_keeps_user_only_stories() {
        let api = FakeStoryApi::new()
            .with_user("bob", "pw", "Bob")
            .with_story("1", "Bob's", "http://x.com", "bob")
            .with_story("2", "Alice's", "http://y.com", "alice");
        api.mark_favorite("bob", "2");
        let (mut session, _api, _credentials) = session_with(api);

        session.login("bob", "pw").await.unwrap();

        assert!(session.stories().is_empty());
        let own: Vec<&str> = session
            .own_stories()
            .unwrap()
            .iter()
            .map(|s| s.story_id().as_str())
            .collect();
        let favorites: Vec<&str> = session
            .favorite_stories()
            .unwrap()
            .iter()
            .map(|s| s.story_id().as_str())
            .collect();
        assert_eq!(own, vec!["1"]);
        assert_eq!(favorites, vec!["2"]);
        assert_eq!(
            session.toggle_favorite(&StoryId::from("1")).await.unwrap(),
            StarState::Favorite
        );
    }

    fn two_user_api() -> FakeStoryApi {
        let api = FakeStoryApi::new()
            .with_user("bob", "pw", "Bob")
            .with_user("alice", "secret", "Alice")
            .with_story("b1", "Bob's", "http://b.com", "bob")
            .with_story("a1", "Alice's", "http://a.com", "alice")
            .with_story("c1", "Carol's", "http://c.com", "carol");
        api.mark_favorite("alice", "c1");
        api
    }

    #[tokio::test]
    async fn test_login_replaces_current_user() {
        let (mut session, _api, credentials) = session_with(two_user_api());
        session.login("bob", "pw").await.unwrap();
        assert!(session.story(&StoryId::from("b1")).is_some());

        session.login("alice", "secret").await.unwrap();

        assert_eq!(
            session.state(),
            SessionState::LoggedIn {
                username: "alice".to_string()
            }
        );
        let own = session.own_stories().unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].story_id().as_str(), "a1");
        let favorites = session.favorite_stories().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].story_id().as_str(), "c1");
        assert!(session.story(&StoryId::from("b1")).is_none());
        assert_eq!(credentials.current().unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_failed_switch_keeps_previous_user() {
        let (mut session, _api, credentials) = session_with(two_user_api());
        session.login("bob", "pw").await.unwrap();
        credentials.fail_writes();

        let err = session.login("alice", "secret").await.unwrap_err();

        assert!(matches!(err, SnoozeError::Storage(_)));
        assert_eq!(
            session.state(),
            SessionState::LoggedIn {
                username: "bob".to_string()
            }
        );
        assert_eq!(session.own_stories().unwrap().len(), 1);
        assert!(session.story(&StoryId::from("a1")).is_none());
        assert_eq!(credentials.current().unwrap().username, "bob");
    }

    #[tokio::test]
    async fn test_restore_rejection_reported_when_clear_fails() {
        let api = Arc::new(sample_api());
        let credentials = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
            "stale", "bob",
        )));
        credentials.fail_writes();
        let mut session = Session::new(api, credentials);

        let err = session.restore().await.unwrap_err();

        assert!(err.is_auth());
        assert!(!session.is_logged_in());
    }
}
