//! Vehicle-condition lookup endpoints. Both require authentication.

use crate::error::ApiError;

use super::client::{ApiClient, error_from_response};

impl ApiClient {
    /// Create or update a vehicle-condition record. The record shape is
    /// owned by the backend; it passes through untyped.
    pub async fn upsert_vehicle_condition(
        &self,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.require_token()?;
        let endpoint = self.url("/vehicle-condition");
        let response = self
            .maybe_authorized(self.client.post(&endpoint))
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Failed to save vehicle condition").await);
        }

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }

    /// Verify the recorded condition for a vehicle number.
    pub async fn verify_vehicle_condition(
        &self,
        vehicle_number: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.require_token()?;
        let endpoint = self.url(&format!("/vehicle-condition/{vehicle_number}/verify"));
        let response = self
            .maybe_authorized(self.client.get(&endpoint))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Vehicle verification failed").await);
        }

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }
}
