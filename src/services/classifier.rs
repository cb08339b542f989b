// src/services/classifier.rs

//! Content/metadata line classification.
//!
//! Scraped posts interleave the author's text with platform chrome: counters,
//! dates, handles and button labels. Each line is judged on its own. A small
//! whitelist of numeric prose ("3 times a day", "50%", "Step 2: ...") wins over
//! the metadata rules, which would otherwise eat legitimate numbered text.

use std::sync::LazyLock;

use regex::Regex;

/// Classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Content,
    Metadata,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

static WHITELIST: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Ranges: "3-5", "10 – 20 phút"
        r"^\d+\s*[-–~]\s*\d+(?:\s+\S.*)?$",
        // Percentages
        r"\d+(?:[.,]\d+)?\s*%",
        // Money
        r"(?i)[$€£¥₫]\s*\d|\d\s*(?:[$€£¥₫]|usd\b|vnd\b|vnđ|đồng\b|triệu\b|dollars?\b)",
        // Frequencies
        r"(?i)\d+\s*(?:times?|lần)\s*(?:a|per|mỗi|một|/)\s*(?:day|week|month|year|ngày|tuần|tháng|năm)",
        // Step / principle enumerations
        r"(?i)^(?:step|bước|principle|nguyên tắc|tip|mẹo|rule|quy tắc|part|phần|lesson|bài)\s*\d+",
        // Numbered list markers
        r"^\d{1,3}[.)]\s+\S",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

static METADATA: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Bare integers and bare K/M counters
        r"^\d+$",
        r"(?i)^\d+(?:[.,]\d+)?\s*[km]$",
        // Counters with an engagement noun
        r"(?i)^\d+(?:[.,]\d+)?\s*[km]?\s+(?:likes?|replies|reply|reposts?|comments?|shares?|views?|quotes?|lượt thích|bình luận|trả lời|chia sẻ|lượt xem|lượt chia sẻ|lượt đăng lại|lượt trích dẫn)$",
        // Bare handle
        r"^@[\w.-]+$",
        // Dates
        r"^\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4}$",
        r"^\d{4}-\d{2}-\d{2}$",
        // Relative time
        r"(?i)^\d+\s*(?:seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?)\s+ago$",
        r"(?i)^\d+\s*[smhdw]$",
        r"(?i)^\d+\s*(?:giây|phút|giờ|ngày|tuần|tháng|năm)(?:\s+trước)?$",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Platform UI labels, lowercase, in English and Vietnamese.
const UI_LABELS: &[&str] = &[
    "translate",
    "see translation",
    "reply thread",
    "view activity",
    "verified",
    "follow",
    "following",
    "mute",
    "block",
    "report",
    "edited",
    "pinned",
    "dịch",
    "xem bản dịch",
    "thread trả lời",
    "xem hoạt động",
    "đã xác minh",
    "theo dõi",
    "đang theo dõi",
    "tắt tiếng",
    "chặn",
    "báo cáo",
    "đã chỉnh sửa",
    "đã ghim",
];

/// Labels lines of scraped text as content or metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, line: &str) -> LineKind {
        let line = line.trim();
        if line.is_empty() || Self::is_whitelisted(line) {
            return LineKind::Content;
        }
        if Self::is_ui_label(line) || METADATA.iter().any(|re| re.is_match(line)) {
            return LineKind::Metadata;
        }
        LineKind::Content
    }

    pub fn is_content(&self, line: &str) -> bool {
        self.classify(line) == LineKind::Content
    }

    /// Keep only content lines. Blank lines survive as paragraph breaks, but
    /// never more than one in a row.
    pub fn retain_content(&self, text: &str) -> String {
        let mut kept: Vec<&str> = Vec::new();
        for line in text.lines() {
            if !self.is_content(line) {
                continue;
            }
            let blank = line.trim().is_empty();
            if blank && kept.last().is_none_or(|prev| prev.trim().is_empty()) {
                continue;
            }
            kept.push(line);
        }
        while kept.last().is_some_and(|l| l.trim().is_empty()) {
            kept.pop();
        }
        kept.join("\n")
    }

    fn is_whitelisted(line: &str) -> bool {
        WHITELIST.iter().any(|re| re.is_match(line))
    }

    fn is_ui_label(line: &str) -> bool {
        let lower = line.to_lowercase();
        let lower = lower.trim_end_matches(['.', ':', '·', '•']).trim();
        UI_LABELS.contains(&lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(line: &str) -> LineKind {
        LineClassifier::new().classify(line)
    }

    #[test]
    fn test_counters_are_metadata() {
        assert_eq!(kind("12"), LineKind::Metadata);
        assert_eq!(kind("1.2K"), LineKind::Metadata);
        assert_eq!(kind("5 lượt thích"), LineKind::Metadata);
        assert_eq!(kind("3K likes"), LineKind::Metadata);
        assert_eq!(kind("1 reply"), LineKind::Metadata);
    }

    #[test]
    fn test_dates_handles_and_times_are_metadata() {
        assert_eq!(kind("3/4/2024"), LineKind::Metadata);
        assert_eq!(kind("2024-03-04"), LineKind::Metadata);
        assert_eq!(kind("@alice"), LineKind::Metadata);
        assert_eq!(kind("2 days ago"), LineKind::Metadata);
        assert_eq!(kind("5h"), LineKind::Metadata);
        assert_eq!(kind("3 giờ trước"), LineKind::Metadata);
    }

    #[test]
    fn test_ui_labels_are_metadata() {
        assert_eq!(kind("Translate"), LineKind::Metadata);
        assert_eq!(kind("Dịch"), LineKind::Metadata);
        assert_eq!(kind("Reply thread"), LineKind::Metadata);
        assert_eq!(kind("Xem hoạt động"), LineKind::Metadata);
        assert_eq!(kind("Edited"), LineKind::Metadata);
    }

    #[test]
    fn test_whitelist_wins() {
        assert_eq!(kind("3-5"), LineKind::Content);
        assert_eq!(kind("50%"), LineKind::Content);
        assert_eq!(kind("$100"), LineKind::Content);
        assert_eq!(kind("2 lần mỗi ngày"), LineKind::Content);
        assert_eq!(kind("Take it 3 times a day"), LineKind::Content);
        assert_eq!(kind("Step 2"), LineKind::Content);
        assert_eq!(kind("1. Drink water"), LineKind::Content);
    }

    #[test]
    fn test_prose_is_content() {
        assert_eq!(kind("Great day!"), LineKind::Content);
        assert_eq!(kind("Nội dung thật"), LineKind::Content);
        assert_eq!(kind("I follow this rule every day"), LineKind::Content);
        assert_eq!(kind(""), LineKind::Content);
    }

    #[test]
    fn test_retain_content() {
        let classifier = LineClassifier::new();
        assert_eq!(
            classifier.retain_content("Great day!\n12\n3/4/2024"),
            "Great day!"
        );
        assert_eq!(
            classifier.retain_content("First\n\n12\n\nSecond\n\n"),
            "First\n\nSecond"
        );
        assert_eq!(classifier.retain_content("5 lượt thích\nNội dung thật\n"), "Nội dung thật");
    }
}
