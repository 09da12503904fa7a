//! Wayfarer session core.
//!
//! SYSTEM CONTEXT
//! ==============
//! The travel planner's views (home, login, register, dashboard) all talk to
//! the same remote API. This crate owns the part of that client with real
//! state: the bearer credential, the request/response hooks around every API
//! call, the reactive "who is logged in" state, and the route guard that reads
//! it. Rendering is left to the host.
//!
//! LAYOUT
//! ======
//! - [`credential`]: durable single-token storage.
//! - [`net`]: authenticated HTTP client, fault handling, wire types, trips.
//! - [`session`]: controller state machine, expiry events, route guard.
//! - [`forms`]: input validation that runs before any network call.

pub mod config;
pub mod credential;
pub mod error;
pub mod forms;
pub mod net;
pub mod session;

pub use config::ClientConfig;
pub use credential::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::ApiError;
pub use net::client::ApiClient;
pub use net::types::UserProfile;
pub use session::controller::SessionController;
pub use session::events::{SessionEvent, SessionEvents};
pub use session::guard::{GuardDecision, Route, RouteGuard};
pub use session::state::{SessionPhase, SessionState};
