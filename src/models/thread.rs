// src/models/thread.rs

//! Whole-thread input and export envelopes.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::post::{Author, CleanedPost, PostCandidate, UNKNOWN_USERNAME};

/// Reading speed used for the read-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Maximum username length kept in export file names.
const MAX_FILE_STEM: usize = 40;

static IMAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[Image:\s*(https?://[^\]\s]+)\]").expect("static regex")
});
static FILE_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[^a-z0-9._-]+").expect("static regex"));

/// Everything the scraper hands over for one thread page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ThreadCapture {
    /// Page URL
    #[serde(default)]
    pub url: String,

    /// Resolved author username, if the scraper found one
    #[serde(default)]
    pub author_username: Option<String>,

    /// Raw `og:title` meta content, used when no username is given
    #[serde(default)]
    pub meta_title: Option<String>,

    #[serde(default)]
    pub posts: Vec<PostCandidate>,
}

impl ThreadCapture {
    /// Thread author, preferring the explicit username over the meta title.
    pub fn author(&self) -> Author {
        if let Some(name) = self
            .author_username
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
        {
            let mut author = Author::from_username(name);
            if let Some(meta) = &self.meta_title {
                let parsed = Author::from_meta_title(meta);
                if parsed.name == author.name {
                    author.display_name = parsed.display_name;
                }
            }
            return author;
        }
        match &self.meta_title {
            Some(meta) => Author::from_meta_title(meta),
            None => Author::unknown(),
        }
    }

    /// Username used for author-specific cleaning rules.
    pub fn author_username(&self) -> String {
        let author = self.author();
        if author.is_unknown() {
            UNKNOWN_USERNAME.to_string()
        } else {
            author.name
        }
    }
}

/// Aggregate numbers about an exported thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadStats {
    pub post_count: usize,
    pub word_count: usize,
    pub read_time_minutes: usize,
}

/// Final export document for the rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadExport {
    pub url: String,
    pub author: Author,
    pub exported_at_ms: i64,
    pub stats: ThreadStats,
    /// Unique image URLs referenced by `[Image: ..]` markers, in post order
    pub image_urls: Vec<String>,
    pub posts: Vec<CleanedPost>,
}

impl ThreadExport {
    pub fn new(url: impl Into<String>, author: Author, posts: Vec<CleanedPost>) -> Self {
        let word_count = posts.iter().map(CleanedPost::word_count).sum();
        let stats = ThreadStats {
            post_count: posts.len(),
            word_count,
            read_time_minutes: read_time_minutes(word_count),
        };
        let image_urls = collect_image_urls(posts.iter().map(|p| p.text.as_str()));
        Self {
            url: url.into(),
            author,
            exported_at_ms: chrono::Utc::now().timestamp_millis(),
            stats,
            image_urls,
            posts,
        }
    }

    /// Suggested output file name, e.g. `thread_alice_1700000000000.json`.
    pub fn file_name(&self) -> String {
        format!(
            "thread_{}_{}.json",
            sanitize_username(&self.author.name),
            self.exported_at_ms
        )
    }
}

/// Read time in whole minutes, never less than one.
pub fn read_time_minutes(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Collect unique image URLs from `[Image: url]` markers.
pub fn collect_image_urls<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for text in texts {
        for caps in IMAGE_MARKER.captures_iter(text) {
            let url = caps[1].to_string();
            if seen.insert(url.clone()) {
                urls.push(url);
            }
        }
    }
    urls
}

/// Make a username safe for use in a file name.
pub fn sanitize_username(name: &str) -> String {
    let trimmed = name.trim().trim_start_matches('@');
    let safe = FILE_UNSAFE.replace_all(trimmed, "_");
    let safe: String = safe.chars().take(MAX_FILE_STEM).collect();
    if safe.is_empty() {
        UNKNOWN_USERNAME.to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(text: &str) -> CleanedPost {
        CleanedPost {
            text: text.to_string(),
            author: Author::unknown(),
            timestamp_ms: 0,
            media_urls: vec![],
            replies: vec![],
        }
    }

    #[test]
    fn test_read_time_minimum() {
        assert_eq!(read_time_minutes(0), 1);
        assert_eq!(read_time_minutes(200), 1);
        assert_eq!(read_time_minutes(201), 2);
    }

    #[test]
    fn test_collect_image_urls_dedups() {
        let urls = collect_image_urls([
            "a [Image: https://x/1.jpg] [Link: https://x/page]",
            "b [Image: https://x/1.jpg] [image: https://x/2.png]",
        ]);
        assert_eq!(urls, vec!["https://x/1.jpg", "https://x/2.png"]);
    }

    #[test]
    fn test_sanitize_username() {
        assert_eq!(sanitize_username("@jane.doe"), "jane.doe");
        assert_eq!(sanitize_username("a b/c"), "a_b_c");
        assert_eq!(sanitize_username("@"), "unknown");
        assert_eq!(sanitize_username(&"x".repeat(60)).len(), 40);
    }

    #[test]
    fn test_export_stats_and_file_name() {
        let export = ThreadExport::new(
            "https://www.threads.net/@alice/post/1",
            Author::from_username("alice"),
            vec![post("one two three"), post("four [Image: https://x/y.jpg]")],
        );
        assert_eq!(export.stats.post_count, 2);
        assert_eq!(export.stats.word_count, 6);
        assert_eq!(export.stats.read_time_minutes, 1);
        assert_eq!(export.image_urls, vec!["https://x/y.jpg"]);
        assert!(export.file_name().starts_with("thread_alice_"));
        assert!(export.file_name().ends_with(".json"));
    }

    #[test]
    fn test_capture_author_resolution() {
        let capture = ThreadCapture {
            meta_title: Some("Alice Liddell (@alice)".into()),
            ..ThreadCapture::default()
        };
        assert_eq!(capture.author_username(), "alice");
        assert_eq!(capture.author().display_name, "Alice Liddell");

        let explicit = ThreadCapture {
            author_username: Some("@bob".into()),
            ..ThreadCapture::default()
        };
        assert_eq!(explicit.author_username(), "bob");

        assert_eq!(ThreadCapture::default().author_username(), "unknown");
    }
}
