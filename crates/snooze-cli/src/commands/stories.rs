use super::App;
use super::render::{self, NO_FAVORITES, NO_OWN_STORIES, NO_STORIES};
use anyhow::{Context, Result};
use snooze_application::{Session, StarState};
use snooze_core::story::{StoryDraft, StoryId};

fn print_list(session: &Session, stories: &[&snooze_core::story::Story], empty_notice: &str) {
    let text = render::story_list(stories, |s| session.star_for(s.story_id()), empty_notice);
    println!("{}", text);
}

pub async fn list(app: &App) -> Result<()> {
    let report = app.start().await;
    if let Some(e) = &report.restore_error {
        eprintln!("warning: {}", e);
    }
    if let Some(e) = report.fetch_error {
        return Err(e).context("Could not load stories");
    }

    let session = report.session;
    print_list(&session, &session.stories(), NO_STORIES);
    Ok(())
}

pub async fn mine(app: &App) -> Result<()> {
    let session = app.logged_in_session().await?;
    print_list(&session, &session.own_stories()?, NO_OWN_STORIES);
    Ok(())
}

pub async fn favorites(app: &App) -> Result<()> {
    let session = app.logged_in_session().await?;
    print_list(&session, &session.favorite_stories()?, NO_FAVORITES);
    Ok(())
}

pub async fn submit(app: &App, title: &str, author: &str, url: &str) -> Result<()> {
    let mut session = app.logged_in_session().await?;
    let story = session
        .add_story(&StoryDraft::new(title, author, url))
        .await?;

    println!("Submitted:");
    println!("{}", render::story_entry(&story, session.star_for(story.story_id())));
    Ok(())
}

pub async fn delete(app: &App, story_id: &str) -> Result<()> {
    let mut session = app.logged_in_session().await?;
    let story_id = StoryId::from(story_id);
    session.remove_story(&story_id).await?;

    println!("Deleted story {}", story_id);
    Ok(())
}

pub async fn toggle_favorite(app: &App, story_id: &str) -> Result<()> {
    let mut session = app.logged_in_session().await?;
    let story_id = StoryId::from(story_id);

    let verb = match session.toggle_favorite(&story_id).await? {
        StarState::Favorite => "Added to",
        StarState::NotFavorite => "Removed from",
    };
    println!("{} favorites: {}", verb, title_of(&session, &story_id));
    Ok(())
}

pub async fn unfavorite(app: &App, story_id: &str) -> Result<()> {
    let mut session = app.logged_in_session().await?;
    let story_id = StoryId::from(story_id);
    session.remove_favorite(&story_id).await?;

    println!("Removed from favorites: {}", title_of(&session, &story_id));
    Ok(())
}

fn title_of(session: &Session, story_id: &StoryId) -> String {
    session
        .story(story_id)
        .map(|s| s.title().to_string())
        .unwrap_or_else(|| story_id.to_string())
}
