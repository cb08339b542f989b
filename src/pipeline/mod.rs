// src/pipeline/mod.rs

//! Pipeline entry points.
//!
//! - `run_extraction`: Clean and deduplicate a captured thread
//! - `run_validate`: Check the config and the pattern document

pub mod extract;
pub mod validate;

pub use extract::{clean_posts, process_posts, run_extraction};
pub use validate::{ValidationReport, run_validate};
