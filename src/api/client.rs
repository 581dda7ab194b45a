//! Invoice submission client.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::invoice::payload::{Attachment, InvoicePayload};

/// Seam between the form engine and the backend, so sessions are testable
/// without a network.
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    /// Submit the invoice payload plus an optional weighment-slip file.
    /// One attempt; no retry or backoff.
    async fn create_invoice(
        &self,
        payload: InvoicePayload,
        attachment: Option<Attachment>,
    ) -> Result<CreatedInvoice, ApiError>;
}

/// The created-resource descriptor the engine acts on. `pdf_url`, when
/// present, is already absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedInvoice {
    pub id: Option<String>,
    pub pdf_url: Option<String>,
}

/// HTTP client for the MandiPlus REST API.
pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_base: String,
    pub(crate) web_base: String,
    pub(crate) auth_token: Option<SecretString>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base_url.clone(),
            web_base: config.web_base_url.clone(),
            auth_token: config.auth_token.clone(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Attach the bearer token when the user is logged in.
    pub(crate) fn maybe_authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    pub(crate) fn require_token(&self) -> Result<&SecretString, ApiError> {
        self.auth_token
            .as_ref()
            .ok_or_else(|| ApiError::Unauthenticated("no bearer token configured".to_string()))
    }
}

#[async_trait]
impl InvoiceApi for ApiClient {
    async fn create_invoice(
        &self,
        payload: InvoicePayload,
        attachment: Option<Attachment>,
    ) -> Result<CreatedInvoice, ApiError> {
        let endpoint = self.url("/insurance-forms");

        let mut form = Form::new();
        for (name, value) in payload.text_fields() {
            form = form.text(name, value);
        }
        if let Some(attachment) = attachment {
            form = form.part(
                "weighmentSlips",
                Part::bytes(attachment.bytes).file_name(attachment.file_name),
            );
        }

        let response = self
            .maybe_authorized(self.client.post(&endpoint))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(
                response,
                "Failed to create invoice. Please try again.",
            )
            .await);
        }

        let wire: CreateInvoiceWire =
            response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse {
                    endpoint,
                    reason: e.to_string(),
                })?;

        Ok(CreatedInvoice {
            id: wire.id,
            pdf_url: wire
                .pdf_url
                .map(|url| resolve_document_url(&self.web_base, &url)),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CreateInvoiceWire {
    #[serde(default, rename = "_id", alias = "id")]
    id: Option<String>,
    #[serde(default, rename = "pdfUrl", alias = "pdfURL")]
    pdf_url: Option<String>,
}

/// Resolve a document link: absolute URLs pass through, relative paths are
/// joined onto the web base.
pub fn resolve_document_url(web_base: &str, raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("{web_base}{raw}")
    }
}

/// Backend error bodies carry `message` as either one string or a list of
/// validation messages.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    One(String),
    Many(Vec<String>),
}

/// Flatten an error body to display text: lists join with `", "`. Returns
/// `None` when the body is not the expected shape.
pub(crate) fn flatten_error_body(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.message {
        ErrorDetail::One(message) => Some(message),
        ErrorDetail::Many(messages) if !messages.is_empty() => Some(messages.join(", ")),
        ErrorDetail::Many(_) => None,
    }
}

/// Turn a non-success response into an `ApiError`, degrading to `fallback`
/// when the body is unreadable or malformed.
pub(crate) async fn error_from_response(response: reqwest::Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = flatten_error_body(&body).unwrap_or_else(|| fallback.to_string());
    ApiError::Backend { status, message }
}
