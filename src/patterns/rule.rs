// src/patterns/rule.rs

//! Cleaning rules and rule sets.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

use super::defaults;

/// One rule as written in the pattern document.
///
/// `flags` uses the JavaScript letters the document format was designed
/// around: `g` replaces every match, `i`/`m`/`s` map to inline regex flags,
/// `u` is accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub description: String,
}

impl RuleSpec {
    pub fn new(name: &str, pattern: &str, flags: &str, replacement: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            replacement: replacement.to_string(),
            description: String::new(),
        }
    }
}

/// Root of the external pattern document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDocument {
    pub patterns: Vec<RuleSpec>,
}

impl PatternDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A compiled cleaning rule.
#[derive(Debug, Clone)]
pub struct CleaningRule {
    pub name: String,
    pub description: String,
    regex: Regex,
    replacement: String,
    global: bool,
}

impl CleaningRule {
    /// Compile a rule spec, rejecting empty patterns and unknown flags.
    pub fn compile(spec: &RuleSpec) -> Result<Self> {
        if spec.pattern.is_empty() {
            return Err(AppError::rule_compile(&spec.name, "empty pattern"));
        }

        let mut inline = String::new();
        let mut global = false;
        for flag in spec.flags.chars() {
            match flag {
                'g' => global = true,
                'i' | 'm' | 's' => {
                    if !inline.contains(flag) {
                        inline.push(flag);
                    }
                }
                'u' => {}
                other => {
                    return Err(AppError::rule_compile(
                        &spec.name,
                        format!("unsupported flag '{other}'"),
                    ));
                }
            }
        }

        let source = if inline.is_empty() {
            spec.pattern.clone()
        } else {
            format!("(?{inline}){}", spec.pattern)
        };
        let regex = Regex::new(&source).map_err(|e| AppError::rule_compile(&spec.name, e))?;

        Ok(Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            regex,
            replacement: spec.replacement.clone(),
            global,
        })
    }

    /// Apply the rule once to `text`.
    pub fn apply(&self, text: &str) -> String {
        let replacement = self.replacement.as_str();
        if self.global {
            self.regex.replace_all(text, replacement).into_owned()
        } else {
            self.regex.replace(text, replacement).into_owned()
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_global(&self) -> bool {
        self.global
    }
}

/// Ordered, immutable list of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CleaningRule>,
}

impl RuleSet {
    /// Compile every spec, collecting the ones that failed.
    pub fn compile(specs: &[RuleSpec]) -> (Self, Vec<AppError>) {
        let mut rules = Vec::with_capacity(specs.len());
        let mut dropped = Vec::new();
        for spec in specs {
            match CleaningRule::compile(spec) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    log::warn!("Dropping cleaning rule: {}", e);
                    dropped.push(e);
                }
            }
        }
        (Self { rules }, dropped)
    }

    /// The built-in rule set used when no document can be loaded.
    pub fn defaults() -> Self {
        Self::compile(&defaults::default_specs()).0
    }

    /// Apply every rule in order, each to the previous rule's output.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CleaningRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rule(s)", self.rules.len())
    }
}
