//! OTP authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

use super::client::{ApiClient, error_from_response};

/// Result of requesting an OTP.
#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
}

/// OTP verification request. `category` and `state` are collected at
/// registration time only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpPayload {
    pub mobile_number: String,
    pub otp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// The authenticated user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub mobile_number: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// OTP verification result: a token and user on success, a message otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Normalize a mobile number to the ten digits the backend expects: strip
/// everything non-numeric, then the country prefix `91` while more than
/// ten digits remain.
pub fn normalize_mobile_number(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    while digits.len() > 10 {
        match digits.strip_prefix("91") {
            Some(rest) => digits = rest.to_string(),
            None => break,
        }
    }
    digits
}

impl ApiClient {
    /// Request an OTP for a mobile number.
    pub async fn send_otp(&self, mobile_number: &str) -> Result<SendOtpResponse, ApiError> {
        let endpoint = self.url("/auth/send-otp");
        let response = self
            .client
            .post(&endpoint)
            .json(&serde_json::json!({ "mobileNumber": mobile_number }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Failed to send OTP").await);
        }

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }

    /// Verify an OTP and complete registration. The mobile number is
    /// normalized before it goes out.
    pub async fn verify_otp(&self, payload: &VerifyOtpPayload) -> Result<AuthResponse, ApiError> {
        let endpoint = self.url("/auth/verify-otp");
        let cleaned = VerifyOtpPayload {
            mobile_number: normalize_mobile_number(&payload.mobile_number),
            ..payload.clone()
        };

        let response = self
            .client
            .post(&endpoint)
            .json(&cleaned)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "OTP verification failed").await);
        }

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }

    /// Fetch the logged-in user. Requires a configured bearer token.
    pub async fn current_user(&self) -> Result<AuthUser, ApiError> {
        self.require_token()?;
        let endpoint = self.url("/auth/me");
        let response = self
            .maybe_authorized(self.client.get(&endpoint))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Not logged in").await);
        }

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_country_prefix() {
        assert_eq!(normalize_mobile_number("+91 98765-43210"), "9876543210");
        assert_eq!(normalize_mobile_number("919876543210"), "9876543210");
        assert_eq!(normalize_mobile_number("98765 43210"), "9876543210");
    }

    #[test]
    fn bare_ten_digit_numbers_starting_with_91_survive() {
        assert_eq!(normalize_mobile_number("9187654321"), "9187654321");
    }

    #[test]
    fn doubled_prefix_is_stripped_repeatedly() {
        assert_eq!(normalize_mobile_number("91919876543210"), "9876543210");
    }

    #[test]
    fn non_prefix_excess_digits_are_left_alone() {
        // Too long but no 91 prefix: nothing sensible to strip here.
        assert_eq!(normalize_mobile_number("12345678901"), "12345678901");
    }

    #[test]
    fn auth_response_parses_with_and_without_token() {
        let with: AuthResponse = serde_json::from_str(
            r#"{"token":"t0k","user":{"_id":"u1","mobileNumber":"9876543210","category":"trader","state":"MH"}}"#,
        )
        .unwrap();
        assert_eq!(with.token.as_deref(), Some("t0k"));
        assert_eq!(with.user.as_ref().unwrap().id, "u1");
        assert_eq!(with.user.unwrap().mobile_number, "9876543210");

        let without: AuthResponse =
            serde_json::from_str(r#"{"message":"Invalid OTP"}"#).unwrap();
        assert!(without.token.is_none());
        assert_eq!(without.message.as_deref(), Some("Invalid OTP"));
    }

    #[test]
    fn verify_payload_serializes_camel_case() {
        let payload = VerifyOtpPayload {
            mobile_number: "9876543210".to_string(),
            otp: "123456".to_string(),
            category: None,
            state: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["mobileNumber"], "9876543210");
        assert_eq!(json["otp"], "123456");
        assert!(json.get("category").is_none());
    }
}
