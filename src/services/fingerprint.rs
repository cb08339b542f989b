// src/services/fingerprint.rs

//! Post identity keys.
//!
//! A [`Fingerprint`] recognizes the same logical post across re-scrapes of a
//! virtualized page. It is a structured value with field-wise equality; its
//! `Display` form is the pipe-joined key used in logs.

use std::fmt;

use chrono::DateTime;

use crate::models::{FingerprintConfig, PostCandidate};
use crate::services::media::MediaType;
use crate::utils::text::{normalize, rolling_hash, truncate_chars};

/// Fast hash of normalized text, used as an exact-duplicate pre-filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(u32);

impl ContentHash {
    /// Hash `text` after whitespace collapsing and lowercasing.
    pub fn of(text: &str) -> Self {
        Self::of_normalized(&normalize(text))
    }

    /// Hash text that is already normalized.
    pub fn of_normalized(normalized: &str) -> Self {
        Self(rolling_hash(normalized))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Composite identity of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    /// Hash of the truncated normalized text
    pub content_hash: ContentHash,
    /// Lines in the untruncated text
    pub line_count: usize,
    /// Words in the untruncated text
    pub word_count: usize,
    /// Coarse media types, in media order
    pub media_signature: Vec<MediaType>,
    /// Timestamp rounded down to the second
    pub timestamp_secs: i64,
    pub first_tokens: Vec<String>,
    pub last_tokens: Vec<String>,
}

impl Fingerprint {
    pub fn media_count(&self) -> usize {
        self.media_signature.len()
    }

    /// Second-precision ISO 8601 timestamp, e.g. `2024-03-04T10:20:30`.
    pub fn formatted_time(&self) -> String {
        DateTime::from_timestamp(self.timestamp_secs, 0)
            .map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp_secs.to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signature: Vec<&str> = self.media_signature.iter().map(|m| m.as_str()).collect();
        write!(
            f,
            "{}|{}|{}|{}|{}|{}|{}|{}",
            self.content_hash,
            self.line_count,
            self.word_count,
            self.media_count(),
            signature.join("|"),
            self.formatted_time(),
            self.first_tokens.join("_"),
            self.last_tokens.join("_"),
        )
    }
}

/// Derives [`Fingerprint`]s from candidates.
#[derive(Debug, Clone, Default)]
pub struct FingerprintGenerator {
    config: FingerprintConfig,
}

impl FingerprintGenerator {
    pub fn new(config: FingerprintConfig) -> Self {
        Self { config }
    }

    /// Fingerprint a candidate by its raw text.
    pub fn fingerprint(&self, candidate: &PostCandidate) -> Fingerprint {
        self.fingerprint_text(
            &candidate.raw_text,
            candidate.timestamp_ms,
            &candidate.unique_media_urls(),
        )
    }

    /// Fingerprint arbitrary text (usually the cleaned text) with the
    /// candidate's timestamp and media.
    pub fn fingerprint_text(
        &self,
        text: &str,
        timestamp_ms: i64,
        media_urls: &[String],
    ) -> Fingerprint {
        let normalized = normalize(text);
        let normalized = truncate_chars(&normalized, self.config.max_text_chars);
        let tokens: Vec<&str> = normalized.split(' ').collect();
        let edge = self.config.edge_tokens.min(tokens.len());

        Fingerprint {
            content_hash: ContentHash::of_normalized(normalized),
            line_count: text.split('\n').count(),
            word_count: text.split_whitespace().count(),
            media_signature: media_urls.iter().map(|u| MediaType::of(u)).collect(),
            timestamp_secs: timestamp_ms.div_euclid(1000),
            first_tokens: tokens[..edge].iter().map(|t| t.to_string()).collect(),
            last_tokens: tokens[tokens.len() - edge..]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}
