// src/services/resolver.rs

//! Batch-level duplicate resolution.
//!
//! Overlapping DOM queries and virtualized re-renders hand the same post over
//! several times, sometimes with truncated text. Resolution runs four passes:
//!
//! 1. stable sort by timestamp,
//! 2. fingerprint dedup with a content-hash pre-check and longer-wins replacement,
//! 3. subset elimination (short posts contained in a longer kept post),
//! 4. final stable sort by timestamp.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{
    CleanedPost, CleanedReply, DedupConfig, ERROR_PLACEHOLDER, NO_CONTENT_PLACEHOLDER,
    PostCandidate,
};
use crate::services::fingerprint::{ContentHash, Fingerprint};
use crate::utils::text::{char_len, normalize};

/// A cleaned candidate waiting for resolution.
#[derive(Debug, Clone)]
pub struct DedupEntry {
    pub candidate: PostCandidate,
    pub fingerprint: Fingerprint,
    /// Cleaned text, markers included
    pub text: String,
    pub replies: Vec<CleanedReply>,
}

impl DedupEntry {
    pub fn new(candidate: PostCandidate, fingerprint: Fingerprint, text: impl Into<String>) -> Self {
        Self {
            candidate,
            fingerprint,
            text: text.into(),
            replies: Vec::new(),
        }
    }

    pub fn with_replies(mut self, replies: Vec<CleanedReply>) -> Self {
        self.replies = replies;
        self
    }

    fn media_count(&self) -> usize {
        self.candidate.unique_media_urls().len()
    }

    fn into_post(self) -> CleanedPost {
        let media_urls = self.candidate.unique_media_urls();
        CleanedPost {
            text: self.text,
            author: self.candidate.author,
            timestamp_ms: self.candidate.timestamp_ms,
            media_urls,
            replies: self.replies,
        }
    }
}

/// Counters describing what resolution did with a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveStats {
    pub input: usize,
    pub placeholders: usize,
    pub too_short: usize,
    pub hash_duplicates: usize,
    pub fingerprint_duplicates: usize,
    /// Kept posts replaced by a longer same-fingerprint version
    pub replaced: usize,
    pub subsets: usize,
    pub output: usize,
}

impl ResolveStats {
    /// Candidates that did not make it to the output.
    pub fn dropped(&self) -> usize {
        self.input - self.output
    }
}

/// Resolved posts plus counters.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub posts: Vec<CleanedPost>,
    pub stats: ResolveStats,
}

/// Collapses duplicate candidates into the final post list.
#[derive(Debug, Clone)]
pub struct DuplicateResolver {
    config: DedupConfig,
    placeholders: Vec<String>,
}

impl Default for DuplicateResolver {
    fn default() -> Self {
        Self::new(DedupConfig::default())
    }
}

impl DuplicateResolver {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            placeholders: vec![NO_CONTENT_PLACEHOLDER.into(), ERROR_PLACEHOLDER.into()],
        }
    }

    /// Also treat `placeholder` as a no-content marker.
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        if !self.placeholders.iter().any(|p| p == placeholder) {
            self.placeholders.push(placeholder.to_string());
        }
        self
    }

    /// Resolve a batch into timestamp-ascending posts.
    pub fn resolve(&self, entries: Vec<DedupEntry>) -> Vec<CleanedPost> {
        self.resolve_with_stats(entries).posts
    }

    pub fn resolve_with_stats(&self, mut entries: Vec<DedupEntry>) -> Resolution {
        let mut stats = ResolveStats {
            input: entries.len(),
            ..Default::default()
        };

        entries.sort_by_key(|e| e.candidate.timestamp_ms);
        let kept = self.dedup(entries, &mut stats);
        let kept = if self.config.subset_elimination {
            Self::eliminate_subsets(kept, &mut stats)
        } else {
            kept
        };

        let mut posts: Vec<CleanedPost> = kept.into_iter().map(DedupEntry::into_post).collect();
        posts.sort_by_key(|p| p.timestamp_ms);
        stats.output = posts.len();

        Resolution { posts, stats }
    }

    fn is_placeholder(&self, text: &str) -> bool {
        let text = text.trim();
        self.placeholders.iter().any(|p| p == text)
    }

    fn dedup(&self, entries: Vec<DedupEntry>, stats: &mut ResolveStats) -> Vec<DedupEntry> {
        let mut kept: Vec<DedupEntry> = Vec::new();
        let mut by_fingerprint: HashMap<Fingerprint, usize> = HashMap::new();
        let mut seen_hashes: HashSet<ContentHash> = HashSet::new();
        let mut has_real = false;

        for entry in entries {
            let placeholder = self.is_placeholder(&entry.text);
            let normalized = normalize(&entry.text);

            if placeholder && has_real {
                log::debug!("Skipping placeholder at {}", entry.candidate.timestamp_ms);
                stats.placeholders += 1;
                continue;
            }
            if char_len(&normalized) < self.config.min_text_chars && has_real {
                log::debug!("Skipping near-empty text {:?}", normalized);
                stats.too_short += 1;
                continue;
            }
            let hash = ContentHash::of_normalized(&normalized);
            if seen_hashes.contains(&hash) {
                log::debug!("Skipping exact text duplicate: {}", entry.fingerprint);
                stats.hash_duplicates += 1;
                continue;
            }

            match by_fingerprint.get(&entry.fingerprint) {
                Some(&idx) => {
                    let kept_len = char_len(&kept[idx].text);
                    let new_len = char_len(&entry.text);
                    if new_len as f64 >= kept_len as f64 * self.config.longer_wins_ratio {
                        log::debug!(
                            "Replacing {} char(s) with {} char(s): {}",
                            kept_len,
                            new_len,
                            entry.fingerprint
                        );
                        stats.replaced += 1;
                        seen_hashes.insert(hash);
                        kept[idx] = entry;
                    } else {
                        log::debug!("Skipping fingerprint duplicate: {}", entry.fingerprint);
                        stats.fingerprint_duplicates += 1;
                    }
                }
                None => {
                    by_fingerprint.insert(entry.fingerprint.clone(), kept.len());
                    has_real |= !placeholder;
                    seen_hashes.insert(hash);
                    kept.push(entry);
                }
            }
        }

        kept
    }

    fn eliminate_subsets(kept: Vec<DedupEntry>, stats: &mut ResolveStats) -> Vec<DedupEntry> {
        let normalized: Vec<String> = kept.iter().map(|e| normalize(&e.text)).collect();
        let media: Vec<usize> = kept.iter().map(DedupEntry::media_count).collect();

        let mut order: Vec<usize> = (0..kept.len()).collect();
        order.sort_by_key(|&i| Reverse(char_len(&kept[i].text)));

        let mut excluded = vec![false; kept.len()];
        for (pos, &outer) in order.iter().enumerate() {
            if excluded[outer] {
                continue;
            }
            for &inner in &order[pos + 1..] {
                if !excluded[inner]
                    && media[inner] <= media[outer]
                    && normalized[outer].contains(normalized[inner].as_str())
                {
                    log::debug!(
                        "Dropping {:?}: contained in {:?}",
                        normalized[inner],
                        normalized[outer]
                    );
                    excluded[inner] = true;
                    stats.subsets += 1;
                }
            }
        }

        kept.into_iter()
            .zip(excluded)
            .filter_map(|(entry, excluded)| (!excluded).then_some(entry))
            .collect()
    }
}
