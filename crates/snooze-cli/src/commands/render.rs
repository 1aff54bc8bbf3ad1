//! Plain-text rendering of stories.

use snooze_application::StarState;
use snooze_core::story::Story;

pub const NO_STORIES: &str = "No stories have been posted yet.";
pub const NO_OWN_STORIES: &str = "There are no stories for this user yet.";
pub const NO_FAVORITES: &str = "There are no favorites for this user yet.";

pub fn star_icon(star: Option<StarState>) -> &'static str {
    match star {
        Some(StarState::Favorite) => "★ ",
        Some(StarState::NotFavorite) => "☆ ",
        None => "",
    }
}

/// Two lines per story: title with host, then byline and id.
pub fn story_entry(story: &Story, star: Option<StarState>) -> String {
    let host = story
        .hostname()
        .map(|h| format!(" ({})", h))
        .unwrap_or_default();
    let posted = story
        .created_at_utc()
        .map(|at| format!(" on {}", at.format("%Y-%m-%d")))
        .unwrap_or_default();

    format!(
        "{}{}{}\n    by {} | posted by {}{} | id {}",
        star_icon(star),
        story.title(),
        host,
        story.author(),
        story.username(),
        posted,
        story.story_id()
    )
}

/// Renders a list, or `empty_notice` when there is nothing to show.
pub fn story_list(
    stories: &[&Story],
    star_for: impl Fn(&Story) -> Option<StarState>,
    empty_notice: &str,
) -> String {
    if stories.is_empty() {
        return empty_notice.to_string();
    }
    stories
        .iter()
        .map(|story| story_entry(story, star_for(story)))
        .collect::<Vec<_>>()
        .join("\n")
}
