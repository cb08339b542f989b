// src/models/post.rs

//! Post data structures exchanged with the scraper and the renderer.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Username used when the author cannot be resolved.
pub const UNKNOWN_USERNAME: &str = "unknown";

/// Text of a post with no usable content.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content available";

/// Placeholder emitted by the scraper when it could not read a post body.
pub const ERROR_PLACEHOLDER: &str = "Error extracting post content";

const PROFILE_BASE_URL: &str = "https://www.threads.net/";

static META_FULL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*?)\s+\(@(\w+)\)").expect("static regex"));
static META_USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("static regex"));

/// Author of a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Username without the leading `@`
    pub name: String,

    /// Human-readable display name
    #[serde(default)]
    pub display_name: String,

    /// Profile URL
    #[serde(default)]
    pub url: String,
}

impl Author {
    /// Build an author from a bare username.
    pub fn from_username(username: &str) -> Self {
        let name = username.trim_start_matches('@').to_string();
        Self {
            url: format!("{PROFILE_BASE_URL}@{name}"),
            display_name: name.clone(),
            name,
        }
    }

    /// Parse the page's `og:title` meta content.
    ///
    /// Accepts `"Display Name (@user)"` or anything containing `@user`.
    /// Falls back to an unknown author whose display name is the raw title.
    pub fn from_meta_title(title: &str) -> Self {
        if let Some(caps) = META_FULL_NAME.captures(title) {
            let mut author = Self::from_username(&caps[2]);
            author.display_name = caps[1].trim().to_string();
            return author;
        }
        if let Some(caps) = META_USERNAME.captures(title) {
            return Self::from_username(&caps[1]);
        }
        Self {
            name: UNKNOWN_USERNAME.to_string(),
            display_name: title.trim().to_string(),
            url: PROFILE_BASE_URL.to_string(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_USERNAME.to_string(),
            display_name: "Unknown Author".to_string(),
            url: PROFILE_BASE_URL.to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.name.is_empty() || self.name == UNKNOWN_USERNAME
    }
}

impl Default for Author {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A reply scraped underneath a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub text: String,
    #[serde(default)]
    pub timestamp_ms: i64,
}

impl Reply {
    /// Replies that are really "View more replies" / "Reply to" buttons.
    pub fn is_ui_chrome(&self) -> bool {
        let text = self.text.trim();
        text.is_empty() || text.contains("View more replies") || text.contains("Reply to")
    }
}

/// A raw, possibly duplicated post record produced by the scraper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostCandidate {
    /// Text as scraped, including platform chrome
    #[serde(default)]
    pub raw_text: String,

    #[serde(default)]
    pub author: Author,

    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp_ms: i64,

    /// Media URLs in page order
    #[serde(default)]
    pub media_urls: Vec<String>,

    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl PostCandidate {
    pub fn new(raw_text: impl Into<String>, timestamp_ms: i64) -> Self {
        Self {
            raw_text: raw_text.into(),
            author: Author::default(),
            timestamp_ms,
            media_urls: Vec::new(),
            replies: Vec::new(),
        }
    }

    pub fn with_media(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.media_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Media URLs with duplicates removed, first occurrence wins.
    pub fn unique_media_urls(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.media_urls
            .iter()
            .filter(|url| !url.trim().is_empty() && seen.insert(url.as_str()))
            .cloned()
            .collect()
    }
}

/// A cleaned reply carried on the output post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CleanedReply {
    pub text: String,
    pub timestamp_ms: i64,
}

/// A cleaned, deduplicated post handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CleanedPost {
    /// Cleaned text with `[YouTube: ..]`, `[Image: ..]` and `[Link: ..]` markers
    pub text: String,

    pub author: Author,

    pub timestamp_ms: i64,

    /// Source-ordered, deduplicated media URLs
    pub media_urls: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CleanedReply>,
}

impl CleanedPost {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_from_meta_title_full() {
        let author = Author::from_meta_title("Jane Doe (@jane_doe)");
        assert_eq!(author.name, "jane_doe");
        assert_eq!(author.display_name, "Jane Doe");
        assert_eq!(author.url, "https://www.threads.net/@jane_doe");
    }

    #[test]
    fn test_author_from_meta_title_username_only() {
        let author = Author::from_meta_title("Thread by @bob on Threads");
        assert_eq!(author.name, "bob");
        assert_eq!(author.display_name, "bob");
    }

    #[test]
    fn test_author_from_meta_title_unknown() {
        let author = Author::from_meta_title("Threads");
        assert!(author.is_unknown());
        assert_eq!(author.display_name, "Threads");
    }

    #[test]
    fn test_reply_ui_chrome() {
        let button = Reply {
            text: "View more replies".into(),
            timestamp_ms: 0,
        };
        let real = Reply {
            text: "Totally agree".into(),
            timestamp_ms: 0,
        };
        assert!(button.is_ui_chrome());
        assert!(!real.is_ui_chrome());
    }

    #[test]
    fn test_unique_media_urls_preserves_order() {
        let candidate = PostCandidate::new("x", 0).with_media(["b.jpg", "a.jpg", "b.jpg", " "]);
        assert_eq!(candidate.unique_media_urls(), vec!["b.jpg", "a.jpg"]);
    }

    #[test]
    fn test_candidate_deserializes_camel_case() {
        let json = r#"{
            "rawText": "Hello",
            "author": {"name": "alice", "displayName": "Alice", "url": "https://www.threads.net/@alice"},
            "timestampMs": 1000,
            "mediaUrls": ["https://x/y.jpg"],
            "replies": [{"text": "hi", "timestampMs": 2000}]
        }"#;
        let candidate: PostCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.raw_text, "Hello");
        assert_eq!(candidate.author.display_name, "Alice");
        assert_eq!(candidate.media_urls.len(), 1);
        assert_eq!(candidate.replies[0].timestamp_ms, 2000);
    }
}
