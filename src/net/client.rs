//! Authenticated JSON client for the travel planner API.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` per application instance. Each call runs the
//! [`RequestAuthenticator`] as the last step before sending and hands the
//! response status to the [`FaultHandler`] before anything else looks at it.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become [`ApiError::Transport`], 401 becomes
//! [`ApiError::Unauthorized`] (after teardown), other non-success statuses
//! become [`ApiError::Status`] carrying the server's `detail` text. Nothing is
//! retried here.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::authenticator::RequestAuthenticator;
use super::fault::FaultHandler;
use crate::config::ClientConfig;
use crate::credential::CredentialStore;
use crate::error::ApiError;
use crate::session::events::SessionEvents;

pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialStore>,
    authenticator: RequestAuthenticator,
    faults: FaultHandler,
}

impl ApiClient {
    /// Build a client that reads and clears `credentials` and reports expiry
    /// on `events`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
        events: SessionEvents,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            authenticator: RequestAuthenticator::new(credentials.clone()),
            faults: FaultHandler::new(credentials.clone(), events),
            credentials,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The store this client authenticates from.
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// `GET {path}` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// See the module docs.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.config.endpoint(path)), path).await
    }

    /// `POST {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// See the module docs.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.config.endpoint(path)).json(body), path).await
    }

    /// `PUT {path}` with a JSON body.
    ///
    /// # Errors
    ///
    /// See the module docs.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.put(self.config.endpoint(path)).json(body), path).await
    }

    /// `DELETE {path}`.
    ///
    /// # Errors
    ///
    /// See the module docs.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.delete(self.config.endpoint(path)), path).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T, ApiError> {
        let request = self.authenticator.authorize(request);
        tracing::debug!(%path, "api request");

        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        self.faults.observe(path, status)?;

        let text = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        if !status.is_success() {
            tracing::debug!(%path, status = status.as_u16(), "api request failed");
            return Err(ApiError::Status { status: status.as_u16(), detail: error_detail(&text) });
        }
        decode_body(&text)
    }
}

/// Decode a success body. An empty body decodes as JSON `null`, which suits
/// `()` and `serde_json::Value` callers.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let body = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the human-readable part out of an error body. The API reports
/// failures as `{"detail": "..."}`; validation failures use a structured
/// `detail`, which is passed along as compact JSON.
fn error_detail(text: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        return text.trim().to_owned();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(detail) => detail.to_string(),
        None => text.trim().to_owned(),
    }
}
