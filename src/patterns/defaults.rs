// src/patterns/defaults.rs

//! Built-in fallback cleaning rules.

use super::rule::RuleSpec;

fn spec(name: &str, pattern: &str, flags: &str, replacement: &str, description: &str) -> RuleSpec {
    RuleSpec {
        description: description.to_string(),
        ..RuleSpec::new(name, pattern, flags, replacement)
    }
}

/// Rules used when the pattern document is unreachable or malformed.
pub fn default_specs() -> Vec<RuleSpec> {
    vec![
        spec(
            "Username/handle at start",
            r"^(@[a-zA-Z0-9_.-]+|[a-zA-Z0-9_]+)\n",
            "m",
            "",
            "First handle line of the scraped block",
        ),
        spec(
            "Date (MM/DD/YYYY)",
            r"\d{1,2}/\d{1,2}/\d{4}\n",
            "g",
            "",
            "Post date stamp",
        ),
        spec(
            "Relative time (English)",
            r"\n\d+ (days?|hours?|minutes?|seconds?) ago\b",
            "g",
            "",
            "e.g. '3 hours ago'",
        ),
        spec(
            "Relative time (Vietnamese)",
            r"\n\d+ (ngày|giờ|phút|giây)( trước)?\b",
            "g",
            "",
            "e.g. '3 giờ trước'",
        ),
        spec(
            "Multiple metrics",
            r"\n\d+\n\d+\n\d+(\n\d+)?$",
            "g",
            "",
            "Trailing block of like/reply/repost counters",
        ),
        spec(
            "Engagement metrics (English)",
            r"\n\d+ (likes?|replies?|reposts?|comments?)(\n|$)",
            "g",
            "\n",
            "e.g. '12 likes'",
        ),
        spec(
            "Engagement metrics (Vietnamese)",
            r"\n\d+ (lượt thích|bình luận|trả lời|chia sẻ)(\n|$)",
            "g",
            "\n",
            "e.g. '12 lượt thích'",
        ),
        spec("Translate (English)", r"\nTranslate\n", "g", "\n", "Translate button"),
        spec("Translate (Vietnamese)", r"\nDịch\n", "g", "\n", "Translate button"),
        spec(
            "Reply thread (Vietnamese)",
            r"\nThread trả lời\n",
            "g",
            "\n",
            "Reply thread label",
        ),
        spec(
            "Reply thread (English)",
            r"\nReply thread\n",
            "g",
            "\n",
            "Reply thread label",
        ),
        spec(
            "View activity (Vietnamese)",
            r"\nXem hoạt động\n",
            "g",
            "\n",
            "View activity link",
        ),
        spec(
            "View activity (English)",
            r"\nView activity\n",
            "g",
            "\n",
            "View activity link",
        ),
        spec(
            "Handle at end of line",
            r"@[a-zA-Z0-9._-]+\s*$",
            "gm",
            "",
            "Trailing @mention left by the byline",
        ),
        spec(
            "Handle at start of line",
            r"^@[a-zA-Z0-9._-]+\s*",
            "gm",
            "",
            "Leading @mention left by the byline",
        ),
        spec(
            "Multiple line breaks",
            r"\n{3,}",
            "g",
            "\n\n",
            "Collapse 3+ newlines into a paragraph break",
        ),
    ]
}
