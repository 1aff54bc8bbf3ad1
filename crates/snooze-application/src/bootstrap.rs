//! Startup sequence: restore the remembered login, then load the listing.

use crate::session::Session;
use snooze_core::SnoozeError;
use snooze_core::api::StoryApi;
use snooze_core::credentials::CredentialStore;
use std::sync::Arc;

/// Outcome of [`start`].
///
/// Startup never fails as a whole: a broken restore leaves the session
/// logged out, a broken fetch leaves the listing empty. Both errors are
/// kept here so the caller can report them.
pub struct StartupReport {
    pub session: Session,
    pub restore_error: Option<SnoozeError>,
    pub fetch_error: Option<SnoozeError>,
}

impl StartupReport {
    pub fn is_clean(&self) -> bool {
        self.restore_error.is_none() && self.fetch_error.is_none()
    }
}

/// Builds a session: restore the remembered user, then fetch all stories.
///
/// The restore runs first so the listing is rendered with favorite stars.
pub async fn start(api: Arc<dyn StoryApi>, credentials: Arc<dyn CredentialStore>) -> StartupReport {
    tracing::debug!("[Bootstrap] Starting session");
    let mut session = Session::new(api, credentials);

    let restore_error = match session.restore().await {
        Ok(true) => None,
        Ok(false) => None,
        Err(e) => {
            tracing::warn!("[Bootstrap] Could not restore login: {}", e);
            Some(e)
        }
    };

    let fetch_error = match session.refresh_stories().await {
        Ok(()) => {
            tracing::info!("[Bootstrap] Loaded {} stories", session.stories().len());
            None
        }
        Err(e) => {
            tracing::warn!("[Bootstrap] Could not load stories: {}", e);
            Some(e)
        }
    };

    StartupReport {
        session,
        restore_error,
        fetch_error,
    }
}
