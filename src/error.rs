//! Error types for the triage service.
//!
//! The triage engine itself never fails: provider errors are recovered inside
//! the classifier and every other step falls through to a default branch.
//! These types cover configuration, the optional sentiment provider, and the
//! HTTP server bootstrap.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sentiment provider error: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Sentiment provider errors.
///
/// Never surfaced past the classifier; it logs them and falls back to the
/// lexicon strategy.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Provider {provider} returned an empty label distribution")]
    EmptyDistribution { provider: String },
}

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server terminated: {0}")]
    Serve(#[from] std::io::Error),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
