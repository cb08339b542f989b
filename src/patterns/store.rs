// src/patterns/store.rs

//! Session-wide holder of the active rule set.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::task::JoinHandle;

use crate::error::{AppError, Result};

use super::rule::{PatternDocument, RuleSet};
use super::source::PatternSource;

/// Outcome of loading a pattern document.
#[derive(Debug)]
pub struct LoadReport {
    /// Rules that ended up active
    pub rules: RuleSet,
    /// Location the document was read from
    pub source: String,
    /// Individual rules that failed to compile
    pub dropped: Vec<AppError>,
    /// Set when the whole document was unusable and defaults were used
    pub fallback: Option<AppError>,
}

impl LoadReport {
    pub fn used_defaults(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Holds the active [`RuleSet`].
///
/// Readers take a cheap [`Arc`] snapshot; reloads build a complete new set
/// and swap it in, so a batch never observes a half-updated rule list.
#[derive(Debug)]
pub struct PatternStore {
    active: RwLock<Arc<RuleSet>>,
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternStore {
    /// Create a store holding the built-in rules.
    pub fn new() -> Self {
        Self::with_rules(RuleSet::defaults())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            active: RwLock::new(Arc::new(rules)),
        }
    }

    /// The rule set currently resident.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        let guard = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Replace the active rule set wholesale.
    pub fn replace(&self, rules: RuleSet) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(rules);
    }

    /// Load a rule set from `source`, never failing.
    ///
    /// Bad rules are dropped one by one. An unreachable or malformed document,
    /// or one with no usable rule at all, yields the built-in defaults.
    pub async fn load(source: &dyn PatternSource) -> LoadReport {
        let name = source.describe();
        match Self::try_load(source).await {
            Ok((rules, dropped)) if !rules.is_empty() => {
                log::info!(
                    "Loaded {} cleaning pattern(s) from {} ({} dropped)",
                    rules.len(),
                    name,
                    dropped.len()
                );
                LoadReport {
                    rules,
                    source: name,
                    dropped,
                    fallback: None,
                }
            }
            Ok((_, dropped)) => {
                log::warn!("No usable patterns in {}. Using default patterns.", name);
                LoadReport {
                    rules: RuleSet::defaults(),
                    fallback: Some(AppError::config_load(&name, "no usable patterns")),
                    source: name,
                    dropped,
                }
            }
            Err(e) => {
                log::warn!("Pattern load failed: {}. Using default patterns.", e);
                LoadReport {
                    rules: RuleSet::defaults(),
                    source: name,
                    dropped: Vec::new(),
                    fallback: Some(e),
                }
            }
        }
    }

    async fn try_load(source: &dyn PatternSource) -> Result<(RuleSet, Vec<AppError>)> {
        let body = source
            .fetch()
            .await
            .map_err(|e| AppError::config_load(source.describe(), e))?;
        let document = PatternDocument::from_json(&body)
            .map_err(|e| AppError::config_load(source.describe(), e))?;
        Ok(RuleSet::compile(&document.patterns))
    }

    /// Load from `source` and make the result active.
    pub async fn reload(&self, source: &dyn PatternSource) -> LoadReport {
        let report = Self::load(source).await;
        self.replace(report.rules.clone());
        report
    }

    /// Reload in the background; batches keep using the resident set until
    /// the new one is swapped in.
    pub fn spawn_reload(self: &Arc<Self>, source: Box<dyn PatternSource>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            store.reload(source.as_ref()).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::StaticSource;

    const DOC: &str = r##"{
        "patterns": [
            {"name": "Digits", "pattern": "\\d+", "flags": "g", "replacement": "#", "description": "numbers"},
            {"name": "Broken", "pattern": "(", "flags": "g", "replacement": ""}
        ]
    }"##;

    #[tokio::test]
    async fn test_load_drops_bad_rule() {
        let report = PatternStore::load(&StaticSource::new("doc", DOC)).await;
        assert!(!report.used_defaults());
        assert_eq!(report.rules.names(), vec!["Digits"]);
        assert_eq!(report.dropped.len(), 1);
    }

    #[tokio::test]
    async fn test_load_malformed_falls_back() {
        let report = PatternStore::load(&StaticSource::new("doc", "not json")).await;
        assert!(report.used_defaults());
        assert_eq!(report.rules.len(), RuleSet::defaults().len());
    }

    #[tokio::test]
    async fn test_load_all_rules_invalid_falls_back() {
        let doc = r#"{"patterns": [{"name": "x", "pattern": "[", "flags": "g"}]}"#;
        let report = PatternStore::load(&StaticSource::new("doc", doc)).await;
        assert!(report.used_defaults());
        assert_eq!(report.dropped.len(), 1);
    }

    #[tokio::test]
    async fn test_reload_swaps_but_old_snapshot_survives() {
        let store = PatternStore::new();
        let before = store.snapshot();
        store.reload(&StaticSource::new("doc", DOC)).await;
        let after = store.snapshot();

        assert_eq!(before.len(), RuleSet::defaults().len());
        assert_eq!(after.names(), vec!["Digits"]);
        assert_eq!(after.apply("a1b22"), "a#b#");
    }

    #[tokio::test]
    async fn test_spawn_reload() {
        let store = Arc::new(PatternStore::new());
        store
            .spawn_reload(Box::new(StaticSource::new("doc", DOC)))
            .await
            .unwrap();
        assert_eq!(store.snapshot().names(), vec!["Digits"]);
    }
}
