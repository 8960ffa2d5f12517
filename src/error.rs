use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(merutto::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(merutto::config))]
    Config(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(merutto::validation))]
    Validation(String),

    #[error("Invalid datetime: {0}")]
    #[diagnostic(
        code(merutto::invalid_datetime),
        help("expected a local datetime such as 2024-03-15T14:30")
    )]
    InvalidDateTime(String),

    #[error("End time {end} is earlier than start time {start}")]
    #[diagnostic(code(merutto::range_invalid))]
    RangeInvalid { start: String, end: String },

    #[error("Text generation error: {0}")]
    #[diagnostic(code(merutto::text_generation))]
    TextGeneration(String),

    #[error("Geolocation error: {0}")]
    #[diagnostic(code(merutto::geolocation))]
    Geolocation(String),

    #[error(transparent)]
    #[diagnostic(code(merutto::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(merutto::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(merutto::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create datetime format errors
pub fn invalid_datetime(value: &str) -> Error {
    Error::InvalidDateTime(value.to_string())
}

/// Helper to create text generation errors
pub fn text_generation_error(message: &str) -> Error {
    Error::TextGeneration(message.to_string())
}

/// Helper to create geolocation errors
pub fn geolocation_error(message: &str) -> Error {
    Error::Geolocation(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
