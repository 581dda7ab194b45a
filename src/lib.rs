//! MandiPlus — conversational invoice client.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod invoice;
