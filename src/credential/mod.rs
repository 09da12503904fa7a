//! Bearer credential storage.
//!
//! DESIGN
//! ======
//! Exactly one credential is active at a time. Stores are synchronous and
//! infallible once constructed so the request authenticator, the fault
//! handler, and the session controller can all read and clear the same token
//! without coordinating. Every `set`/`clear` is visible to the next `get`.

mod file;
mod memory;

use std::fmt;

pub use file::{FileCredentialStore, StoreError};
pub use memory::MemoryCredentialStore;

/// Opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Durable home of the single active credential.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if one is stored.
    fn get(&self) -> Option<Credential>;

    /// Replace the stored credential.
    fn set(&self, credential: Credential);

    /// Remove the stored credential. Clearing an empty store is a no-op.
    fn clear(&self);
}
