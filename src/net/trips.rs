//! Trip CRUD. Same authenticated client, no session logic of its own.

use std::sync::Arc;

use super::client::ApiClient;
use super::types::{Trip, TripDraft, TripPatch};
use crate::error::ApiError;

#[derive(Clone)]
pub struct TripsApi {
    client: Arc<ApiClient>,
}

impl TripsApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /trips`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    pub async fn list(&self) -> Result<Vec<Trip>, ApiError> {
        self.client.get("/trips").await
    }

    /// `GET /trips/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    pub async fn get(&self, id: i64) -> Result<Trip, ApiError> {
        self.client.get(&format!("/trips/{id}")).await
    }

    /// `POST /trips`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    pub async fn create(&self, draft: &TripDraft) -> Result<Trip, ApiError> {
        self.client.post("/trips", draft).await
    }

    /// `PUT /trips/{id}` with only the fields set in `patch`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    pub async fn update(&self, id: i64, patch: &TripPatch) -> Result<Trip, ApiError> {
        self.client.put(&format!("/trips/{id}"), patch).await
    }

    /// `DELETE /trips/{id}`. The body is whatever the server acknowledges with.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the call fails or the server rejects it.
    pub async fn delete(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.client.delete(&format!("/trips/{id}")).await
    }
}
