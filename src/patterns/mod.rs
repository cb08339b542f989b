// src/patterns/mod.rs

//! Cleaning patterns: rule compilation, built-in defaults, document sources,
//! and the session-wide [`PatternStore`].

mod defaults;
pub mod rule;
pub mod source;
pub mod store;

pub use defaults::default_specs;
pub use rule::{CleaningRule, PatternDocument, RuleSet, RuleSpec};
pub use source::{FileSource, HttpSource, PatternSource, StaticSource, from_location};
pub use store::{LoadReport, PatternStore};
