// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where cleaning patterns come from
    #[serde(default)]
    pub patterns: PatternsConfig,

    /// Text cleaning thresholds
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Fingerprint shape
    #[serde(default)]
    pub fingerprint: FingerprintConfig,

    /// Duplicate resolution thresholds
    #[serde(default)]
    pub dedup: DedupConfig,

    /// Export formatting
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.patterns.timeout_secs == 0 {
            return Err(AppError::validation("patterns.timeout_secs must be > 0"));
        }
        if self.patterns.user_agent.trim().is_empty() {
            return Err(AppError::validation("patterns.user_agent is empty"));
        }
        if self.cleaning.placeholder.trim().is_empty() {
            return Err(AppError::validation("cleaning.placeholder is empty"));
        }
        if self.cleaning.min_content_chars == 0 {
            return Err(AppError::validation("cleaning.min_content_chars must be > 0"));
        }
        if self.cleaning.min_original_chars < self.cleaning.min_content_chars {
            return Err(AppError::validation(
                "cleaning.min_original_chars must be >= cleaning.min_content_chars",
            ));
        }
        if self.fingerprint.max_text_chars == 0 {
            return Err(AppError::validation("fingerprint.max_text_chars must be > 0"));
        }
        if !self.dedup.longer_wins_ratio.is_finite() || self.dedup.longer_wins_ratio < 1.0 {
            return Err(AppError::validation("dedup.longer_wins_ratio must be >= 1.0"));
        }
        Ok(())
    }
}

/// Pattern document location and fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternsConfig {
    /// File path or http(s) URL of the JSON pattern document
    #[serde(default)]
    pub source: Option<String>,

    /// Timeout for remote pattern documents
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for remote pattern documents
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            source: None,
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Text cleaning thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Cleaned text shorter than this is considered degenerate...
    #[serde(default = "defaults::min_content_chars")]
    pub min_content_chars: usize,

    /// ...but only when the original text was longer than this
    #[serde(default = "defaults::min_original_chars")]
    pub min_original_chars: usize,

    /// Text used for candidates with no usable content
    #[serde(default = "defaults::placeholder")]
    pub placeholder: String,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_content_chars: defaults::min_content_chars(),
            min_original_chars: defaults::min_original_chars(),
            placeholder: defaults::placeholder(),
        }
    }
}

/// Fingerprint shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintConfig {
    /// Normalized text is truncated to this many characters
    #[serde(default = "defaults::max_text_chars")]
    pub max_text_chars: usize,

    /// Number of leading and trailing tokens kept
    #[serde(default = "defaults::edge_tokens")]
    pub edge_tokens: usize,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            max_text_chars: defaults::max_text_chars(),
            edge_tokens: defaults::edge_tokens(),
        }
    }
}

/// Duplicate resolution thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// A same-fingerprint candidate replaces the kept one at this length ratio
    #[serde(default = "defaults::longer_wins_ratio")]
    pub longer_wins_ratio: f64,

    /// Normalized text shorter than this is treated as empty
    #[serde(default = "defaults::min_text_chars")]
    pub min_text_chars: usize,

    /// Drop posts fully contained in a longer kept post
    #[serde(default = "defaults::enabled")]
    pub subset_elimination: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            longer_wins_ratio: defaults::longer_wins_ratio(),
            min_text_chars: defaults::min_text_chars(),
            subset_elimination: true,
        }
    }
}

/// Export formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::enabled")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

mod defaults {
    pub fn timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; threadclean/0.1)".into()
    }
    pub fn min_content_chars() -> usize {
        20
    }
    pub fn min_original_chars() -> usize {
        100
    }
    pub fn placeholder() -> String {
        crate::models::NO_CONTENT_PLACEHOLDER.into()
    }
    pub fn max_text_chars() -> usize {
        200
    }
    pub fn edge_tokens() -> usize {
        3
    }
    pub fn longer_wins_ratio() -> f64 {
        1.5
    }
    pub fn min_text_chars() -> usize {
        3
    }
    pub fn enabled() -> bool {
        true
    }
}
