// src/pipeline/validate.rs

use serde::Serialize;

use crate::error::Result;
use crate::models::Config;
use crate::patterns::{LoadReport, PatternSource, PatternStore, RuleSet};

/// Outcome of validating the configuration and the pattern document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Where the rules came from
    pub source: String,
    /// Names of the rules that ended up active
    pub active_rules: Vec<String>,
    /// One message per rule that failed to compile
    pub dropped: Vec<String>,
    /// Why the document was rejected, if the defaults were used instead
    pub fallback: Option<String>,
}

impl ValidationReport {
    fn from_load(report: &LoadReport) -> Self {
        Self {
            source: report.source.clone(),
            active_rules: report.rules.names().into_iter().map(String::from).collect(),
            dropped: report.dropped.iter().map(ToString::to_string).collect(),
            fallback: report.fallback.as_ref().map(ToString::to_string),
        }
    }

    /// True when every rule compiled and no fallback was needed.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty() && self.fallback.is_none()
    }
}

/// Validate the config, then load the pattern document and report on it.
///
/// Without a source the built-in rules are reported.
pub async fn run_validate(
    config: &Config,
    source: Option<&dyn PatternSource>,
) -> Result<ValidationReport> {
    log::info!("Validating configuration...");
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    log::info!("✓ Config OK");

    let load = match source {
        Some(source) => PatternStore::load(source).await,
        None => LoadReport {
            rules: RuleSet::defaults(),
            source: "built-in defaults".to_string(),
            dropped: Vec::new(),
            fallback: None,
        },
    };
    let report = ValidationReport::from_load(&load);

    log::info!(
        "✓ {} active pattern(s) from {}",
        report.active_rules.len(),
        report.source
    );
    for message in &report.dropped {
        log::warn!("  dropped: {}", message);
    }
    if let Some(reason) = &report.fallback {
        log::warn!("  fell back to defaults: {}", reason);
    }

    Ok(report)
}
