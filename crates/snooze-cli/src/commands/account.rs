use super::App;
use anyhow::{Context, Result};

pub async fn signup(app: &App, name: &str, username: &str, password: &str) -> Result<()> {
    let mut session = app.fresh_session();
    let user = session.signup(name, username, password).await?;

    println!("Welcome, {}! You are logged in as {}.", user.name(), user.username());
    Ok(())
}

pub async fn login(app: &App, username: &str, password: &str) -> Result<()> {
    let mut session = app.fresh_session();
    let user = session.login(username, password).await?;

    println!("Logged in as {} ({}).", user.username(), user.name());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.fresh_session()
        .logout()
        .context("Failed to forget the saved login")?;

    println!("Logged out.");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let session = app.logged_in_session().await?;
    let user = session.current_user().context("Not logged in")?;

    println!("{} ({})", user.name(), user.username());
    println!("Account created: {}", user.created_at());
    println!(
        "{} stories submitted, {} favorites",
        user.own_story_ids().len(),
        user.favorite_ids().len()
    );
    Ok(())
}
