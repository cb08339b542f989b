// src/error.rs

//! Unified error handling for the cleaning pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Pattern source unreachable or malformed
    #[error("Failed to load patterns from {source_name}: {message}")]
    ConfigLoad {
        source_name: String,
        message: String,
    },

    /// A single cleaning rule could not be compiled
    #[error("Invalid rule '{name}': {message}")]
    RuleCompile { name: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The input candidate list was empty
    #[error("No posts found")]
    NoPosts,
}

impl AppError {
    /// Create a pattern-source load error.
    pub fn config_load(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::ConfigLoad {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a rule compilation error.
    pub fn rule_compile(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::RuleCompile {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
