//! End-to-end behavior of the cleaning pipeline.

use std::io::Write;
use std::path::Path;

use threadclean::error::AppError;
use threadclean::models::{CleanedPost, Config, PostCandidate, ThreadCapture};
use threadclean::patterns::{FileSource, PatternStore};
use threadclean::pipeline::{clean_posts, run_extraction};
use threadclean::services::{DedupEntry, DuplicateResolver, FingerprintGenerator, TextCleaner};

fn clean(candidates: &[PostCandidate], author: &str) -> Vec<CleanedPost> {
    clean_posts(candidates, author, &PatternStore::new(), &Config::default())
}

fn texts(posts: &[CleanedPost]) -> Vec<&str> {
    posts.iter().map(|p| p.text.as_str()).collect()
}

fn entry(text: &str, ts: i64) -> DedupEntry {
    let candidate = PostCandidate::new(text, ts);
    let fingerprint = FingerprintGenerator::default().fingerprint_text(text, ts, &[]);
    DedupEntry::new(candidate, fingerprint, text)
}

/// 300 chars, 60 words; `tail` e's replace the last five.
fn long_text(tail: usize) -> String {
    format!("{}{}", "abcd ".repeat(59), "e".repeat(tail))
}

#[test]
fn test_scenario_media_version_wins() {
    let posts = clean(
        &[
            PostCandidate::new("@alice\nGreat day!\n12\n3/4/2024", 100),
            PostCandidate::new("Great day!", 100).with_media(["https://x/y.jpg"]),
        ],
        "alice",
    );
    assert_eq!(texts(&posts), vec!["Great day! [Image: https://x/y.jpg]"]);
    assert_eq!(posts[0].media_urls, vec!["https://x/y.jpg"]);
}

#[test]
fn test_scenario_vietnamese_metric_removed() {
    let posts = clean(&[PostCandidate::new("5 lượt thích\nNội dung thật\n", 200)], "unknown");
    assert_eq!(texts(&posts), vec!["Nội dung thật"]);
}

#[test]
fn test_scenario_empty_input() {
    assert!(DuplicateResolver::default().resolve(Vec::new()).is_empty());

    let err = run_extraction(&ThreadCapture::default(), &PatternStore::new(), &Config::default())
        .unwrap_err();
    assert!(matches!(err, AppError::NoPosts));
    assert_eq!(err.to_string(), "No posts found");
}

#[test]
fn test_identical_candidates_leave_one() {
    let media = ["https://x/a.jpg", "https://x/b.mp4"];
    let posts = clean(
        &[
            PostCandidate::new("Morning run done.\nFeeling great", 5_000).with_media(media),
            PostCandidate::new("Morning  run done.\nfeeling GREAT", 5_900).with_media(media),
            PostCandidate::new("Morning run done.\nFeeling great", 5_000).with_media(media),
        ],
        "unknown",
    );
    assert_eq!(posts.len(), 1);
}

#[test]
fn test_same_text_seconds_apart_leaves_one() {
    let posts = clean(
        &[
            PostCandidate::new("Morning run done.\nFeeling great", 5_000),
            PostCandidate::new("Morning run done.\nFeeling great", 65_000),
        ],
        "unknown",
    );
    assert_eq!(texts(&posts), vec!["Morning run done.\nFeeling great"]);
    assert_eq!(posts[0].timestamp_ms, 5_000);
}

#[test]
fn test_longer_wins_at_exactly_one_and_a_half() {
    let short = long_text(5);
    let long = long_text(155);
    assert_eq!(long.chars().count() * 2, short.chars().count() * 3);

    let a = entry(&short, 1_000);
    let b = entry(&long, 1_000);
    assert_eq!(a.fingerprint, b.fingerprint);

    let posts = DuplicateResolver::default().resolve(vec![a, b]);
    assert_eq!(texts(&posts), vec![long.as_str()]);
}

#[test]
fn test_shorter_than_one_and_a_half_keeps_original() {
    let short = long_text(5);
    let long = long_text(152);
    assert_eq!(long.chars().count() * 100, short.chars().count() * 149);

    let a = entry(&short, 1_000);
    let b = entry(&long, 1_000);
    assert_eq!(a.fingerprint, b.fingerprint);

    let posts = DuplicateResolver::default().resolve(vec![a, b]);
    assert_eq!(texts(&posts), vec![short.as_str()]);
}

#[test]
fn test_contained_post_removed() {
    let posts = clean(
        &[
            PostCandidate::new("Hello world", 10),
            PostCandidate::new("Hello world and more context", 20),
        ],
        "unknown",
    );
    assert_eq!(texts(&posts), vec!["Hello world and more context"]);
}

#[test]
fn test_output_never_goes_back_in_time() {
    let candidates: Vec<PostCandidate> = [900, 100, 500, 100, 700, 300]
        .into_iter()
        .enumerate()
        .map(|(i, ts)| PostCandidate::new(format!("Distinct post number {i} about topic {ts}"), ts))
        .collect();
    let posts = clean(&candidates, "unknown");

    assert_eq!(posts.len(), candidates.len());
    assert!(posts.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
}

#[test]
fn test_cleaning_cleaned_text_changes_nothing() {
    let cleaner = TextCleaner::new(PatternStore::new().snapshot(), Config::default().cleaning);
    let raw = "@alice\nSlept 8 hours last night.\n\nTake it 3 times a day with water.\n42 likes\nTranslate";

    let once = cleaner.clean(&PostCandidate::new(raw, 0), "alice");
    assert_eq!(once, "Slept 8 hours last night.\n\nTake it 3 times a day with water.");

    let twice = cleaner.clean(&PostCandidate::new(once.clone(), 0), "alice");
    assert_eq!(twice, once);
}

#[test]
fn test_extraction_from_capture_json() {
    let capture: ThreadCapture = serde_json::from_str(
        r#"{
            "url": "https://www.threads.net/@alice/post/abc",
            "metaTitle": "Alice Nguyen (@alice)",
            "posts": [
                {
                    "rawText": "@alice\nFirst thoughts on the trip https://youtu.be/v1\n3 giờ trước",
                    "timestampMs": 2000,
                    "mediaUrls": ["https://cdn.example/p1.jpg"],
                    "replies": [
                        {"text": "View more replies", "timestampMs": 2100},
                        {"text": "Looks amazing!", "timestampMs": 2200}
                    ]
                },
                {"rawText": "Day two was even better", "timestampMs": 3000},
                {"rawText": "@alice\nFirst thoughts on the trip https://youtu.be/v1", "timestampMs": 2000,
                 "mediaUrls": ["https://cdn.example/p1.jpg"]}
            ]
        }"#,
    )
    .unwrap();

    let export = run_extraction(&capture, &PatternStore::new(), &Config::default()).unwrap();

    assert_eq!(export.author.name, "alice");
    assert_eq!(export.author.display_name, "Alice Nguyen");
    assert_eq!(
        texts(&export.posts),
        vec![
            "First thoughts on the trip [YouTube: https://youtu.be/v1] [Image: https://cdn.example/p1.jpg]",
            "Day two was even better",
        ]
    );
    assert_eq!(export.posts[0].replies.len(), 1);
    assert_eq!(export.posts[0].replies[0].text, "Looks amazing!");
    assert_eq!(export.image_urls, vec!["https://cdn.example/p1.jpg"]);
    assert_eq!(export.stats.post_count, 2);
    assert_eq!(export.stats.read_time_minutes, 1);
    assert!(export.file_name().starts_with("thread_alice_"));

    let json = serde_json::to_value(&export).unwrap();
    assert!(json["posts"][1].get("replies").is_none());
    assert_eq!(json["posts"][0]["timestampMs"], 2000);
}

#[tokio::test]
async fn test_patterns_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"patterns": [
            {{"name": "Sponsored", "pattern": "^sponsored$", "flags": "gim", "replacement": ""}},
            {{"name": "Broken", "pattern": "(", "flags": "g", "replacement": ""}}
        ]}}"#
    )
    .unwrap();

    let store = PatternStore::new();
    let report = store.reload(&FileSource::new(file.path())).await;
    assert!(!report.used_defaults());
    assert_eq!(report.dropped.len(), 1);

    let posts = clean_posts(
        &[PostCandidate::new("Sponsored\nActual words here", 1)],
        "unknown",
        &store,
        &Config::default(),
    );
    assert_eq!(texts(&posts), vec!["Actual words here"]);
}

#[tokio::test]
async fn test_missing_pattern_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let report = PatternStore::load(&FileSource::new(dir.path().join("missing.json"))).await;
    assert!(report.used_defaults());
    assert!(!report.rules.is_empty());
}

#[tokio::test]
async fn test_shipped_data_files_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));

    let config = Config::load(root.join("data/config.toml")).unwrap();
    assert!(config.validate().is_ok());

    let report = PatternStore::load(&FileSource::new(root.join("data/cleaning-patterns.json"))).await;
    assert!(!report.used_defaults());
    assert!(report.dropped.is_empty());
    assert_eq!(report.rules.len(), threadclean::patterns::RuleSet::defaults().len());
}
