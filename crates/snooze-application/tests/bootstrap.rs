use snooze_application::{SessionState, StarState, start};
use snooze_core::SnoozeError;
use snooze_core::api::ApiError;
use snooze_core::credentials::Credentials;
use snooze_core::story::StoryId;
use snooze_core::testing::{FakeStoryApi, MemoryCredentialStore};
use std::sync::Arc;

fn api() -> Arc<FakeStoryApi> {
    Arc::new(
        FakeStoryApi::new()
            .with_user("bob", "pw", "Bob")
            .with_story("2", "Newer", "https://www.y.com/a", "bob")
            .with_story("1", "Older", "http://x.com", "alice"),
    )
}

#[tokio::test]
async fn test_start_logged_out() {
    let api = api();
    let report = start(api, Arc::new(MemoryCredentialStore::new())).await;

    assert!(report.is_clean());
    assert_eq!(report.session.state(), SessionState::LoggedOut);
    let titles: Vec<&str> = report.session.stories().iter().map(|s| s.title()).collect();
    assert_eq!(titles, vec!["Newer", "Older"]);
}

#[tokio::test]
async fn test_start_restores_remembered_user() {
    let api = api();
    api.mark_favorite("bob", "1");
    let token = api.token_for("bob");
    let credentials = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
        token, "bob",
    )));

    let report = start(api, credentials).await;
    let session = &report.session;

    assert!(report.is_clean());
    assert_eq!(
        session.state(),
        SessionState::LoggedIn {
            username: "bob".to_string()
        }
    );
    assert_eq!(
        session.star_for(&StoryId::from("1")),
        Some(StarState::Favorite)
    );
    assert_eq!(
        session.star_for(&StoryId::from("2")),
        Some(StarState::NotFavorite)
    );
    assert_eq!(session.own_stories().unwrap().len(), 1);
}

#[tokio::test]
async fn test_start_with_expired_token_still_lists_stories() {
    let api = api();
    let credentials = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new(
        "expired", "bob",
    )));

    let report = start(api, credentials.clone()).await;

    assert!(report.restore_error.as_ref().is_some_and(SnoozeError::is_auth));
    assert!(report.fetch_error.is_none());
    assert_eq!(report.session.state(), SessionState::LoggedOut);
    assert_eq!(report.session.stories().len(), 2);
    assert_eq!(credentials.current(), None);
}

#[tokio::test]
async fn test_start_offline() {
    let api = api();
    api.fail_next(ApiError::Transport("offline".to_string()));

    let report = start(api, Arc::new(MemoryCredentialStore::new())).await;

    assert!(report.restore_error.is_none());
    assert!(report.fetch_error.as_ref().is_some_and(SnoozeError::is_transport));
    assert!(report.session.stories().is_empty());
}

#[tokio::test]
async fn test_submit_favorite_and_delete_flow() {
    let api = api();
    let mut session = start(api.clone(), Arc::new(MemoryCredentialStore::new()))
        .await
        .session;
    session.login("bob", "pw").await.unwrap();

    let story = session
        .add_story(&snooze_core::story::StoryDraft::new(
            "Fresh",
            "Bob",
            "https://fresh.dev",
        ))
        .await
        .unwrap();
    let id = story.story_id().clone();
    assert_eq!(session.stories()[0].story_id(), &id);

    assert_eq!(session.toggle_favorite(&id).await.unwrap(), StarState::Favorite);
    assert_eq!(session.favorite_stories().unwrap().len(), 1);

    session.remove_story(&id).await.unwrap();
    assert!(session.favorite_stories().unwrap().is_empty());
    assert_eq!(session.own_stories().unwrap().len(), 1);
    assert!(!api.story_ids().contains(&id.to_string()));
}
