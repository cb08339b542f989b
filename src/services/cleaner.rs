// src/services/cleaner.rs

//! Raw post text to cleaned content text.
//!
//! Order of operations:
//! 1. pull every URL out of the raw text,
//! 2. run the active rule set and the author's own-handle rules,
//! 3. keep content lines only,
//! 4. fall back to lighter passes when the result is degenerate,
//! 5. re-attach media as `[YouTube: ..]` / `[Image: ..]` / `[Link: ..]` markers.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::models::{CleanedReply, CleaningConfig, PostCandidate, UNKNOWN_USERNAME};
use crate::patterns::RuleSet;
use crate::services::classifier::LineClassifier;
use crate::services::media::{MediaKind, MediaRefs, extract_urls};
use crate::utils::text::char_len;

static LIGHT_NOISE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^@[\w.-]+$",
        r"^\d+(?:[.,]\d+)?[KkMm]?$",
        r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}$",
        r"(?i)^(?:translate|see translation|dịch|xem bản dịch)$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Cleaning strategies, tried in order until one gives a usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Rules plus line classification
    Classified,
    /// Only isolated handles, numbers, dates and translate labels removed
    Light,
    /// URL-stripped original text
    Raw,
}

impl Strategy {
    fn next(self) -> Option<Self> {
        match self {
            Self::Classified => Some(Self::Light),
            Self::Light => Some(Self::Raw),
            Self::Raw => None,
        }
    }
}

/// Rules that remove the thread author's own handle.
#[derive(Debug, Clone, Default)]
pub struct AuthorRules {
    rules: Vec<Regex>,
}

impl AuthorRules {
    /// Compile the handle rules for `username`; an unknown author gets none.
    pub fn new(username: &str) -> Self {
        let name = username.trim().trim_start_matches('@');
        if name.is_empty() || name == UNKNOWN_USERNAME {
            return Self::default();
        }

        let escaped = regex::escape(name);
        let boundary = if name.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let patterns = [
            format!(r"(?i)@{escaped}{boundary}"),
            format!(r"(?im)^[ \t]*{escaped}[ \t]*$"),
        ];

        let rules = patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("Skipping author rule for '{}': {}", name, e);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
    }
}

/// Cleaned text plus the media pulled out of it.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub body: String,
    pub media: MediaRefs,
    pub strategy: Strategy,
}

/// Turns raw scraped text into content text.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    rules: Arc<RuleSet>,
    classifier: LineClassifier,
    config: CleaningConfig,
}

impl TextCleaner {
    pub fn new(rules: Arc<RuleSet>, config: CleaningConfig) -> Self {
        Self {
            rules,
            classifier: LineClassifier::new(),
            config,
        }
    }

    /// Clean a candidate's text for the given thread author.
    pub fn clean(&self, candidate: &PostCandidate, author_username: &str) -> String {
        self.clean_with(candidate, &AuthorRules::new(author_username))
    }

    /// Like [`clean`](Self::clean) with precompiled author rules.
    pub fn clean_with(&self, candidate: &PostCandidate, author: &AuthorRules) -> String {
        let mut outcome = self.clean_text(&candidate.raw_text, author);
        for url in &candidate.media_urls {
            outcome.media.push(MediaKind::for_attachment(url), url);
        }
        self.compose(&outcome.body, &outcome.media)
    }

    /// Clean the replies worth keeping; chrome and empty replies are dropped.
    pub fn clean_replies(&self, candidate: &PostCandidate, author: &AuthorRules) -> Vec<CleanedReply> {
        candidate
            .replies
            .iter()
            .filter(|reply| !reply.is_ui_chrome())
            .filter_map(|reply| {
                let outcome = self.clean_text(&reply.text, author);
                if outcome.body.is_empty() && outcome.media.is_empty() {
                    return None;
                }
                Some(CleanedReply {
                    text: self.compose(&outcome.body, &outcome.media),
                    timestamp_ms: reply.timestamp_ms,
                })
            })
            .collect()
    }

    /// Clean raw text, trying each [`Strategy`] until the result is usable.
    pub fn clean_text(&self, raw: &str, author: &AuthorRules) -> CleanOutcome {
        let (stripped, urls) = extract_urls(raw);
        let mut media = MediaRefs::new();
        for url in &urls {
            media.push(MediaKind::for_inline(url), url);
        }

        let original_len = char_len(raw.trim());
        let mut strategy = Strategy::Classified;
        let body = loop {
            let body = self.run(strategy, &stripped, author);
            match strategy.next() {
                Some(next) if self.is_degenerate(&body, original_len) => {
                    log::debug!(
                        "{:?} cleaning left {} char(s) of {}; trying {:?}",
                        strategy,
                        char_len(&body),
                        original_len,
                        next
                    );
                    strategy = next;
                }
                _ => break body,
            }
        };

        CleanOutcome {
            body,
            media,
            strategy,
        }
    }

    fn run(&self, strategy: Strategy, text: &str, author: &AuthorRules) -> String {
        match strategy {
            Strategy::Classified => {
                let ruled = author.apply(&self.rules.apply(text));
                self.classifier.retain_content(&ruled).trim().to_string()
            }
            Strategy::Light => light_cleanup(text),
            Strategy::Raw => retain_lines(text, |_| true),
        }
    }

    fn is_degenerate(&self, body: &str, original_len: usize) -> bool {
        char_len(body) < self.config.min_content_chars
            && original_len > self.config.min_original_chars
    }

    fn compose(&self, body: &str, media: &MediaRefs) -> String {
        let mut parts = Vec::with_capacity(media.len() + 1);
        if !body.is_empty() {
            parts.push(body.to_string());
        }
        parts.extend(media.markers());
        if parts.is_empty() {
            return self.config.placeholder.clone();
        }
        parts.join(" ")
    }
}

/// Remove only isolated handle, number, date and translate-label lines.
fn light_cleanup(text: &str) -> String {
    retain_lines(text, |line| {
        !LIGHT_NOISE.iter().any(|re| re.is_match(line.trim()))
    })
}

/// Keep lines accepted by `keep`, collapsing blank runs and trimming the ends.
fn retain_lines(text: &str, keep: impl Fn(&str) -> bool) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in text.lines().filter(|l| keep(l)) {
        let blank = line.trim().is_empty();
        if blank && kept.last().is_none_or(|prev| prev.trim().is_empty()) {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n").trim().to_string()
}
