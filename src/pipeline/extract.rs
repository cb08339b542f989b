// src/pipeline/extract.rs

//! Thread extraction pipeline.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{
    Author, CleanedPost, Config, PostCandidate, ThreadCapture, ThreadExport, UNKNOWN_USERNAME,
};
use crate::patterns::{PatternStore, RuleSet};
use crate::services::{
    AuthorRules, DedupEntry, DuplicateResolver, FingerprintGenerator, Resolution, TextCleaner,
};

/// Clean, fingerprint and resolve one batch of candidates.
///
/// Candidates without an author of their own are attributed to `author`.
/// An empty result is a legitimate outcome here; only callers decide whether
/// an empty input is an error.
pub fn process_posts(
    candidates: &[PostCandidate],
    author: &Author,
    rules: Arc<RuleSet>,
    config: &Config,
) -> Resolution {
    let cleaner = TextCleaner::new(rules, config.cleaning.clone());
    let author_rules = AuthorRules::new(&author.name);
    let generator = FingerprintGenerator::new(config.fingerprint.clone());

    let entries: Vec<DedupEntry> = candidates
        .iter()
        .map(|candidate| {
            let text = cleaner.clean_with(candidate, &author_rules);
            let fingerprint = generator.fingerprint_text(
                &text,
                candidate.timestamp_ms,
                &candidate.unique_media_urls(),
            );
            let replies = cleaner.clean_replies(candidate, &author_rules);

            let mut candidate = candidate.clone();
            if candidate.author.is_unknown() {
                candidate.author = author.clone();
            }
            DedupEntry::new(candidate, fingerprint, text).with_replies(replies)
        })
        .collect();

    DuplicateResolver::new(config.dedup.clone())
        .with_placeholder(&config.cleaning.placeholder)
        .resolve_with_stats(entries)
}

/// Clean a batch for `author_username` and return the resolved posts.
pub fn clean_posts(
    candidates: &[PostCandidate],
    author_username: &str,
    store: &PatternStore,
    config: &Config,
) -> Vec<CleanedPost> {
    let author = match author_username.trim() {
        "" | UNKNOWN_USERNAME => Author::unknown(),
        name => Author::from_username(name),
    };
    process_posts(candidates, &author, store.snapshot(), config).posts
}

/// Run the pipeline over a captured thread.
///
/// Uses whatever rule set is resident in `store` when the batch starts.
/// Fails with [`AppError::NoPosts`] only when the capture holds no candidates.
pub fn run_extraction(
    capture: &ThreadCapture,
    store: &PatternStore,
    config: &Config,
) -> Result<ThreadExport> {
    if capture.posts.is_empty() {
        log::warn!("No post candidates in capture of {}", capture.url);
        return Err(AppError::NoPosts);
    }

    let author = capture.author();
    log::info!(
        "Extracting {} candidate(s) by @{}",
        capture.posts.len(),
        author.name
    );

    let Resolution { posts, stats } = process_posts(&capture.posts, &author, store.snapshot(), config);
    log::info!(
        "Resolved {} candidate(s) into {} post(s) ({} duplicate(s), {} subset(s), {} replaced)",
        stats.input,
        stats.output,
        stats.hash_duplicates + stats.fingerprint_duplicates,
        stats.subsets,
        stats.replaced
    );
    if posts.is_empty() {
        log::warn!("Every candidate was filtered out");
    }

    Ok(ThreadExport::new(&capture.url, author, posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_capture_is_no_posts() {
        let capture = ThreadCapture::default();
        let err = run_extraction(&capture, &PatternStore::new(), &Config::default()).unwrap_err();
        assert!(matches!(err, AppError::NoPosts));
    }

    #[test]
    fn test_unknown_authors_take_thread_author() {
        let capture = ThreadCapture {
            url: "https://www.threads.net/@alice/post/1".into(),
            author_username: Some("alice".into()),
            posts: vec![PostCandidate::new("A real sentence of text.", 1_000)],
            ..Default::default()
        };
        let export = run_extraction(&capture, &PatternStore::new(), &Config::default()).unwrap();
        assert_eq!(export.posts.len(), 1);
        assert_eq!(export.posts[0].author.name, "alice");
        assert_eq!(export.author.name, "alice");
        assert_eq!(export.stats.post_count, 1);
    }

    #[test]
    fn test_clean_posts_by_username() {
        let candidates = vec![PostCandidate::new("@bob\nHi there friends", 5)];
        let posts = clean_posts(&candidates, "bob", &PatternStore::new(), &Config::default());
        assert_eq!(posts[0].text, "Hi there friends");
    }
}
