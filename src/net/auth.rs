//! Auth endpoints: register, login, current user.

use std::sync::Arc;

use super::client::ApiClient;
use super::types::{LoginRequest, RegisterRequest, TokenResponse, UserProfile, UserSummary};
use crate::credential::Credential;
use crate::error::ApiError;

/// The remote calls the session controller depends on.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/register`. Does not authenticate the session.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    async fn register(&self, request: &RegisterRequest) -> Result<UserSummary, ApiError>;

    /// `POST /auth/login`. On success the returned token, if any, is written
    /// to the credential store before this returns.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    /// `GET /auth/me` using the stored credential.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    async fn current_user(&self) -> Result<UserProfile, ApiError>;
}

/// [`AuthApi`] over the shared HTTP client.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: Arc<ApiClient>,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn register(&self, request: &RegisterRequest) -> Result<UserSummary, ApiError> {
        self.client.post("/auth/register", request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let token: TokenResponse = self.client.post("/auth/login", request).await?;
        match token.access_token.as_deref() {
            Some(access_token) if !access_token.is_empty() => {
                self.client.credentials().set(Credential::new(access_token));
            }
            _ => tracing::warn!("login response carried no access token"),
        }
        Ok(token)
    }

    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/auth/me").await
    }
}
