pub mod account;
pub mod config;
pub mod render;
pub mod stories;

use anyhow::{Result, bail};
use snooze_application::{Session, StartupReport, start};
use snooze_core::api::StoryApi;
use snooze_core::credentials::CredentialStore;
use std::sync::Arc;

/// Services shared by every command.
pub struct App {
    api: Arc<dyn StoryApi>,
    credentials: Arc<dyn CredentialStore>,
}

impl App {
    pub fn new(api: Arc<dyn StoryApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self { api, credentials }
    }

    /// A logged-out session that has not talked to the server yet.
    pub fn fresh_session(&self) -> Session {
        Session::new(self.api.clone(), self.credentials.clone())
    }

    /// Restores the remembered login and loads the listing.
    pub async fn start(&self) -> StartupReport {
        start(self.api.clone(), self.credentials.clone()).await
    }

    /// Like [`App::start`], but fails unless a user is logged in.
    pub async fn logged_in_session(&self) -> Result<Session> {
        let report = self.start().await;
        warn_fetch_error(&report);

        if report.session.is_logged_in() {
            return Ok(report.session);
        }
        match report.restore_error {
            Some(e) => bail!("Not logged in: {}. Run `snooze login <username>`.", e),
            None => bail!("Not logged in. Run `snooze login <username>` first."),
        }
    }
}

fn warn_fetch_error(report: &StartupReport) {
    if let Some(e) = &report.fetch_error {
        eprintln!("warning: {}", e);
    }
}
