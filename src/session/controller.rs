//! Session controller: the single source of truth for who is logged in.
//!
//! DESIGN
//! ======
//! State lives in a `watch` channel owned by one controller instance; there
//! is no global. Views subscribe and re-render on change, and
//! [`RouteGuard`]s are built from the same channel.
//!
//! ```text
//! Initializing --no credential--------------------> Unauthenticated
//! Initializing --credential, /auth/me ok----------> Authenticated(user)
//! Initializing --credential, /auth/me fails-------> Unauthenticated (credential cleared)
//! Unauthenticated --login/register ok-------------> Authenticated(user)
//! Authenticated --logout / expiry-----------------> Unauthenticated
//! ```
//!
//! CONCURRENCY
//! ===========
//! Each mutation is a single `send_modify`. Multi-step sequences (restore,
//! login, register) run one at a time behind an async lock, so two logins
//! fired together finish in lock order instead of racing. `logout` never
//! waits on that lock: it bumps an epoch, as does an expiry that acts. An
//! in-flight sequence checks the epoch after each step; on a mismatch it drops
//! the credential it wrote and reports [`ApiError::Superseded`] instead of
//! resurrecting the session.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;

use super::events::{SessionEvent, SessionEvents};
use super::guard::{Route, RouteGuard};
use super::state::SessionState;
use crate::credential::CredentialStore;
use crate::error::ApiError;
use crate::net::auth::{AuthApi, HttpAuthApi};
use crate::net::client::ApiClient;
use crate::net::types::{LoginRequest, RegisterRequest, UserProfile};

/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
    sequence: Mutex<()>,
    epoch: AtomicU64,
}

impl SessionController {
    /// New controller in the Initializing state. Call
    /// [`SessionController::initialize`] to resolve it.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::initializing());
        Self {
            inner: Arc::new(Inner { api, credentials, state, sequence: Mutex::new(()), epoch: AtomicU64::new(0) }),
        }
    }

    /// Controller backed by the HTTP auth endpoints of `client`, sharing its
    /// credential store.
    #[must_use]
    pub fn with_client(client: Arc<ApiClient>) -> Self {
        let credentials = client.credentials().clone();
        Self::new(Arc::new(HttpAuthApi::new(client)), credentials)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user.clone()
    }

    /// Route guard for `route` that tracks this session.
    #[must_use]
    pub fn guard(&self, route: Route) -> RouteGuard {
        RouteGuard::new(route, self.subscribe())
    }

    /// Resolve the startup state from the credential store. Never fails:
    /// every failure ends Unauthenticated with the credential cleared.
    pub async fn initialize(&self) {
        let _sequence = self.inner.sequence.lock().await;
        let epoch = self.epoch();

        if self.inner.credentials.get().is_none() {
            tracing::info!("no stored credential; session starts unauthenticated");
            self.publish(SessionState::unauthenticated());
            return;
        }

        match self.inner.api.current_user().await {
            Ok(user) if self.is_current(epoch) => {
                tracing::info!(user_id = user.id, username = %user.username, "session restored");
                self.publish(SessionState::authenticated(user));
            }
            Ok(_) => {
                tracing::debug!("logout or expiry during restore; discarding profile");
                self.publish(SessionState::unauthenticated());
            }
            Err(e) => {
                tracing::info!(error = %e, "stored credential rejected; clearing");
                self.inner.credentials.clear();
                self.publish(SessionState::unauthenticated());
            }
        }
    }

    /// Log in, then fetch the profile. Re-runs the full sequence even when
    /// already authenticated.
    ///
    /// # Errors
    ///
    /// Returns the login error unchanged (state untouched), or the profile
    /// fetch error (credential cleared, state Unauthenticated), or
    /// [`ApiError::Superseded`] if `logout` ran meanwhile.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        let _sequence = self.inner.sequence.lock().await;
        let request = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        self.login_locked(&request).await
    }

    /// Register, then run the same sequence as [`SessionController::login`]
    /// with the same credentials. Registration alone never authenticates.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error; the session stays
    /// Unauthenticated.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        let _sequence = self.inner.sequence.lock().await;
        let request =
            RegisterRequest { email: email.to_owned(), username: username.to_owned(), password: password.to_owned() };
        let summary = self.inner.api.register(&request).await?;
        tracing::info!(user_id = summary.id, username = %summary.username, "registered");

        let login = LoginRequest { username: request.username, password: request.password };
        self.login_locked(&login).await
    }

    /// Clear the credential and drop the user. Local only; cannot fail.
    pub fn logout(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.credentials.clear();
        self.inner.state.send_modify(|state| state.user = None);
        tracing::info!("logged out");
    }

    /// React to an expired credential. The fault handler clears the store
    /// before announcing expiry, so a credential present here belongs to a
    /// later login and the announcement is stale.
    pub fn expire(&self) {
        if self.inner.credentials.get().is_some() {
            tracing::debug!("ignoring stale expiry; a newer credential is stored");
            return;
        }
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.state.send_modify(|state| state.user = None);
        tracing::info!("session expired");
    }

    /// Spawn a task that calls [`SessionController::expire`] for every
    /// expiry on `events`. It ends when every event sender is dropped.
    #[must_use]
    pub fn watch_expiry(&self, events: &SessionEvents) -> JoinHandle<()> {
        let mut rx = events.subscribe();
        let controller = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(SessionEvent::Expired { .. }) => controller.expire(),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "session events lagged");
                        controller.expire();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    async fn login_locked(&self, request: &LoginRequest) -> Result<UserProfile, ApiError> {
        let epoch = self.epoch();
        self.inner.api.login(request).await?;
        if self.epoch() != epoch {
            return Err(self.supersede());
        }

        match self.inner.api.current_user().await {
            Ok(user) if self.is_current(epoch) => {
                tracing::info!(user_id = user.id, username = %user.username, "logged in");
                self.publish(SessionState::authenticated(user.clone()));
                Ok(user)
            }
            Ok(_) => Err(self.supersede()),
            Err(e) => {
                tracing::info!(error = %e, "profile fetch after login failed; clearing credential");
                self.inner.credentials.clear();
                self.inner.state.send_modify(|state| state.user = None);
                Err(e)
            }
        }
    }

    fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    /// True while no logout or expiry has run since `epoch` was read and a
    /// credential is still stored.
    fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch && self.inner.credentials.get().is_some()
    }

    /// Drop whatever this sequence stored. Sequences are serialized, so the
    /// credential here can only be the one the superseded login wrote.
    fn supersede(&self) -> ApiError {
        tracing::debug!("logout or expiry during login; discarding credential");
        self.inner.credentials.clear();
        self.inner.state.send_modify(|state| state.user = None);
        ApiError::Superseded
    }

    fn publish(&self, next: SessionState) {
        self.inner.state.send_modify(|state| *state = next);
    }
}
