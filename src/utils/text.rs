// src/utils/text.rs

//! Text normalization and hashing helpers.

/// Collapse every whitespace run to a single space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text for identity comparison: collapsed whitespace, lowercase.
pub fn normalize(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

/// Keep at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Length in characters, used for every length comparison in the pipeline.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// 32-bit polynomial rolling hash (`h = h * 31 + unit`) over UTF-16 code units.
///
/// Wraps like a signed 32-bit integer; the absolute value is returned so the
/// result can be hex-encoded without a sign.
pub fn rolling_hash(text: &str) -> u32 {
    let hash = text
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    hash.unsigned_abs()
}
