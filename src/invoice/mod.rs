//! Outbound invoice contract.

pub mod payload;

pub use payload::{Attachment, InvoicePayload};
