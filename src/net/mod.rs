//! HTTP side of the session core.
//!
//! Every call goes through [`client::ApiClient`], which runs the request
//! authenticator on the way out and the fault handler on the way back.

pub mod auth;
pub mod authenticator;
pub mod client;
pub mod fault;
pub mod trips;
pub mod types;
