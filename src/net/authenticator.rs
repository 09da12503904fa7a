//! Outgoing request hook: attach the stored bearer credential.

#[cfg(test)]
#[path = "authenticator_test.rs"]
mod authenticator_test;

use std::sync::Arc;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::credential::{Credential, CredentialStore};

/// Reads the credential store once per request and, when a credential is
/// present, sets `Authorization: Bearer <token>`. Requests without a stored
/// credential go out unmodified.
#[derive(Clone)]
pub struct RequestAuthenticator {
    credentials: Arc<dyn CredentialStore>,
}

impl RequestAuthenticator {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Header value for the current credential, if any.
    #[must_use]
    pub fn authorization(&self) -> Option<HeaderValue> {
        let credential = self.credentials.get()?;
        bearer_value(&credential)
    }

    /// Apply the authorization header to `request`. Must be the last change
    /// made before the request is sent.
    #[must_use]
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.authorization() {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }
}

fn bearer_value(credential: &Credential) -> Option<HeaderValue> {
    match HeaderValue::from_str(&format!("Bearer {}", credential.as_str())) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some(value)
        }
        Err(_) => {
            tracing::warn!("stored credential is not a valid header value; sending request without it");
            None
        }
    }
}
