//! Incoming response hook: central handling of expired credentials.
//!
//! DESIGN
//! ======
//! Only HTTP 401 is handled here. It clears the credential store and emits
//! [`SessionEvent::Expired`] no matter which endpoint produced it, so the
//! host can navigate to the login view. Every other status passes through to
//! the caller untouched.

#[cfg(test)]
#[path = "fault_test.rs"]
mod fault_test;

use std::sync::Arc;

use reqwest::StatusCode;

use crate::credential::CredentialStore;
use crate::error::ApiError;
use crate::session::events::{SessionEvent, SessionEvents};
use crate::session::guard::Route;

#[derive(Clone)]
pub struct FaultHandler {
    credentials: Arc<dyn CredentialStore>,
    events: SessionEvents,
}

impl FaultHandler {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, events: SessionEvents) -> Self {
        Self { credentials, events }
    }

    /// Inspect a response status. `path` is only used for logging.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for 401, after the credential has
    /// been cleared and the expiry event sent.
    pub fn observe(&self, path: &str, status: StatusCode) -> Result<(), ApiError> {
        if status != StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        tracing::warn!(%path, "credential rejected; tearing down session");
        self.credentials.clear();
        self.events.emit(SessionEvent::Expired { redirect: Route::Login });
        Err(ApiError::Unauthorized)
    }
}
