//! HTTP clients for the MandiPlus backend.

pub mod auth;
pub mod client;
pub mod vehicle;

pub use auth::{AuthResponse, AuthUser, VerifyOtpPayload};
pub use client::{ApiClient, CreatedInvoice, InvoiceApi};
