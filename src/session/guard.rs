//! Route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views consult the guard before rendering. While the session is still
//! initializing the answer is [`GuardDecision::Pending`] so nothing redirects
//! early. [`RouteGuard`] follows the controller's state channel, so an expiry
//! triggered by any request revokes a protected view that is already on
//! screen.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use tokio::sync::watch;

use super::state::{SessionPhase, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
}

/// Who may see a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only for visitors who are not logged in (login, register).
    GuestOnly,
    Protected,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Login, Route::Register, Route::Dashboard];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Parse a path, ignoring any query string or trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Route::Home => Access::Public,
            Route::Login | Route::Register => Access::GuestOnly,
            Route::Dashboard => Access::Protected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not resolved yet; render a neutral placeholder.
    Pending,
    Render(Route),
    Redirect(Route),
}

/// Decide what to show for `route` given `state`.
#[must_use]
pub fn evaluate(state: &SessionState, route: Route) -> GuardDecision {
    match (route.access(), state.phase()) {
        (Access::Public, _) => GuardDecision::Render(route),
        (Access::GuestOnly, SessionPhase::Authenticated) => GuardDecision::Redirect(Route::Dashboard),
        (Access::GuestOnly, _) => GuardDecision::Render(route),
        (Access::Protected, SessionPhase::Initializing) => GuardDecision::Pending,
        (Access::Protected, SessionPhase::Authenticated) => GuardDecision::Render(route),
        (Access::Protected, SessionPhase::Unauthenticated) => GuardDecision::Redirect(Route::Login),
    }
}

/// Guard for one route that re-evaluates on every session change.
pub struct RouteGuard {
    route: Route,
    state: watch::Receiver<SessionState>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(route: Route, state: watch::Receiver<SessionState>) -> Self {
        Self { route, state }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    /// Decision for the current session state.
    #[must_use]
    pub fn decision(&self) -> GuardDecision {
        evaluate(&self.state.borrow(), self.route)
    }

    /// Wait for the next session change and return the new decision.
    /// `None` once the controller is gone.
    pub async fn changed(&mut self) -> Option<GuardDecision> {
        self.state.changed().await.ok()?;
        Some(evaluate(&self.state.borrow_and_update(), self.route))
    }

    /// Wait until the decision is no longer [`GuardDecision::Pending`].
    pub async fn resolved(&mut self) -> Option<GuardDecision> {
        loop {
            let decision = evaluate(&self.state.borrow_and_update(), self.route);
            if decision != GuardDecision::Pending {
                return Some(decision);
            }
            self.state.changed().await.ok()?;
        }
    }
}
