// src/models/mod.rs

//! Domain models for the cleaning pipeline.
//!
//! This module contains all data structures exchanged with the scraper,
//! the renderer, and the configuration file.

mod config;
mod post;
mod thread;

// Re-export all public types
pub use config::{
    CleaningConfig, Config, DedupConfig, FingerprintConfig, OutputConfig, PatternsConfig,
};
pub use post::{
    Author, CleanedPost, CleanedReply, ERROR_PLACEHOLDER, NO_CONTENT_PLACEHOLDER, PostCandidate, Reply,
    UNKNOWN_USERNAME,
};
pub use thread::{
    ThreadCapture, ThreadExport, ThreadStats, collect_image_urls, read_time_minutes,
    sanitize_username,
};
