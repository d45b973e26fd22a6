//! Error types for configuration, content generation and video lookup

use crate::llm::LLMProvider;

/// Errors raised while loading or validating configuration.
///
/// Any of these at startup stops the process before a single request is served.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Required API key not found: {0}")]
    MissingSecret(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from the generative-text service
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider:?} API error {status}: {body}")]
    Service {
        provider: LLMProvider,
        status: u16,
        body: String,
    },

    #[error("Response blocked by safety filter: {0}")]
    Blocked(String),

    #[error("Empty response from {0:?}")]
    Empty(LLMProvider),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from the video-search service
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Video search API error {status}: {body}")]
    Service { status: u16, body: String },
}
