use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Network error: {0}")]
    #[diagnostic(code(eventsphere::network))]
    Network(#[from] reqwest::Error),

    #[error("Server responded with HTTP {status}: {message}")]
    #[diagnostic(code(eventsphere::server))]
    Server { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    #[diagnostic(code(eventsphere::decode))]
    Decode(String),

    #[error("{0}")]
    #[diagnostic(code(eventsphere::validation))]
    Validation(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(eventsphere::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(eventsphere::config))]
    Config(String),

    #[error("Session error: {0}")]
    #[diagnostic(code(eventsphere::session))]
    Session(String),

    #[error("Template error: {0}")]
    #[diagnostic(code(eventsphere::template))]
    Template(#[from] askama::Error),

    #[error(transparent)]
    #[diagnostic(code(eventsphere::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(eventsphere::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(eventsphere::other))]
    Other(String),
}

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

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create session errors
pub fn session_error(message: &str) -> Error {
    Error::Session(message.to_string())
}

/// Helper to create errors for non-2xx responses
pub fn server_error(status: u16, message: &str) -> Error {
    Error::Server {
        status,
        message: message.to_string(),
    }
}
