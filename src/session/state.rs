//! Derived session state published by the controller.

use crate::net::types::UserProfile;

/// Lifecycle phase derived from [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup restore has not finished.
    Initializing,
    Unauthenticated,
    Authenticated,
}

/// Snapshot of who is logged in. Authentication is derived from `user`,
/// never stored separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl SessionState {
    #[must_use]
    pub fn initializing() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self { user: None, loading: false }
    }

    #[must_use]
    pub fn authenticated(user: UserProfile) -> Self {
        Self { user: Some(user), loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.user.is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Unauthenticated
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initializing()
    }
}
