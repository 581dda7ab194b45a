//! Error types for the MandiPlus client.

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors talking to the MandiPlus backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    /// The backend rejected the request; `message` is already flattened
    /// (validation lists joined with ", ") and safe to show in-line.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),
}

/// Form-session errors. Validation failures are not errors — they are
/// reported in-band on the transcript; these cover misuse of the session.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("A submission is already in flight for this session")]
    SubmissionInFlight,

    #[error("Session already submitted")]
    SessionComplete,

    #[error("Question {field} does not accept a file attachment")]
    NotAFileQuestion { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
