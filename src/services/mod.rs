// src/services/mod.rs

//! Service layer for the cleaning pipeline.
//!
//! This module contains the business logic for:
//! - Media URL extraction and markers (`MediaRefs`)
//! - Post identity (`FingerprintGenerator`)
//! - Line classification (`LineClassifier`)
//! - Text cleaning (`TextCleaner`)
//! - Duplicate resolution (`DuplicateResolver`)

pub mod classifier;
pub mod cleaner;
pub mod fingerprint;
pub mod media;
pub mod resolver;

pub use classifier::{LineClassifier, LineKind};
pub use cleaner::{AuthorRules, CleanOutcome, Strategy, TextCleaner};
pub use fingerprint::{ContentHash, Fingerprint, FingerprintGenerator};
pub use media::{MediaKind, MediaRef, MediaRefs, MediaType, extract_urls};
pub use resolver::{DedupEntry, DuplicateResolver, Resolution, ResolveStats};
