// src/services/media.rs

//! Media reference extraction and categorization.
//!
//! URLs are pulled out of scraped text before any cleaning rule runs (rules
//! would otherwise mangle them) and re-attached afterwards as bracket markers
//! the renderer knows how to expand.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::url::{get_domain, path_extension, trim_trailing_punctuation};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("static regex"));

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v"];

/// Marker category of a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    YouTube,
    Image,
    Link,
}

impl MediaKind {
    /// Category for a URL found inside post text.
    pub fn for_inline(url: &str) -> Self {
        if is_youtube(url) {
            Self::YouTube
        } else if MediaType::of(url) == MediaType::Img {
            Self::Image
        } else {
            Self::Link
        }
    }

    /// Category for a URL the scraper attached as post media.
    ///
    /// Attachments come from image elements, so anything that is not a
    /// YouTube link or a recognizable video is treated as an image.
    pub fn for_attachment(url: &str) -> Self {
        if is_youtube(url) {
            Self::YouTube
        } else if MediaType::of(url) == MediaType::Video {
            Self::Link
        } else {
            Self::Image
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Image => "Image",
            Self::Link => "Link",
        }
    }
}

/// Coarse media type used in fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaType {
    Img,
    Video,
    Other,
}

impl MediaType {
    pub fn of(url: &str) -> Self {
        match path_extension(url) {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Self::Img,
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => Self::Video,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Img => "img",
            Self::Video => "video",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_youtube(url: &str) -> bool {
    get_domain(url).is_some_and(|domain| {
        matches!(
            domain.as_str(),
            "youtube.com" | "youtu.be" | "youtube-nocookie.com"
        ) || domain.ends_with(".youtube.com")
    })
}

/// A categorized media URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub url: String,
}

impl MediaRef {
    pub fn marker(&self) -> String {
        format!("[{}: {}]", self.kind.label(), self.url)
    }
}

/// Media references of one post, deduplicated by URL.
#[derive(Debug, Clone, Default)]
pub struct MediaRefs {
    refs: Vec<MediaRef>,
    seen: HashSet<String>,
}

impl MediaRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reference unless its URL is already present.
    pub fn push(&mut self, kind: MediaKind, url: &str) {
        let url = url.trim();
        if url.is_empty() || !self.seen.insert(url.to_string()) {
            return;
        }
        self.refs.push(MediaRef {
            kind,
            url: url.to_string(),
        });
    }

    /// Markers grouped YouTube first, then images, then other links.
    /// Order within a group follows insertion order.
    pub fn markers(&self) -> Vec<String> {
        [MediaKind::YouTube, MediaKind::Image, MediaKind::Link]
            .into_iter()
            .flat_map(|kind| self.refs.iter().filter(move |r| r.kind == kind))
            .map(MediaRef::marker)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// Remove every absolute URL from `text`.
///
/// Returns the remaining text and the URLs in order of appearance.
/// Punctuation glued to the end of a URL stays in the text.
pub fn extract_urls(text: &str) -> (String, Vec<String>) {
    let mut stripped = String::with_capacity(text.len());
    let mut urls = Vec::new();
    let mut cursor = 0;

    for m in URL_PATTERN.find_iter(text) {
        let url = trim_trailing_punctuation(m.as_str());
        if url.len() <= "https://".len() {
            continue;
        }
        stripped.push_str(&text[cursor..m.start()]);
        cursor = m.start() + url.len();
        urls.push(url.to_string());
    }
    stripped.push_str(&text[cursor..]);

    (stripped, urls)
}
