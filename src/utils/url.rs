// src/utils/url.rs

//! URL inspection utilities.

use url::Url;

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '"', '\''];

/// Strip punctuation that was glued to a URL by the surrounding prose.
///
/// # Examples
/// ```
/// use threadclean::utils::url::trim_trailing_punctuation;
///
/// assert_eq!(
///     trim_trailing_punctuation("https://example.com/a)."),
///     "https://example.com/a"
/// );
/// ```
pub fn trim_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches(TRAILING_PUNCTUATION)
}

/// Extract the lowercase host of a URL, without a `www.`/`m.` prefix.
///
/// # Examples
/// ```
/// use threadclean::utils::url::get_domain;
///
/// assert_eq!(
///     get_domain("https://www.YouTube.com/watch?v=1"),
///     Some("youtube.com".to_string())
/// );
/// ```
pub fn get_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(host.as_str());
    Some(host.to_string())
}

/// Lowercase file extension of the URL path, ignoring query and fragment.
pub fn path_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    };
    let last = path.rsplit('/').next()?;
    let (stem, ext) = last.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_punctuation() {
        assert_eq!(trim_trailing_punctuation("https://x/y.jpg,"), "https://x/y.jpg");
        assert_eq!(trim_trailing_punctuation("https://x/y"), "https://x/y");
    }

    #[test]
    fn test_get_domain() {
        assert_eq!(get_domain("https://youtu.be/abc"), Some("youtu.be".to_string()));
        assert_eq!(
            get_domain("https://m.youtube.com/watch?v=abc"),
            Some("youtube.com".to_string())
        );
        assert_eq!(get_domain("not a url"), None);
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(
            path_extension("https://scontent.cdn.com/v/t51/123_n.JPG?stp=dst-jpg"),
            Some("jpg".to_string())
        );
        assert_eq!(path_extension("https://x/y.jpg"), Some("jpg".to_string()));
        assert_eq!(path_extension("https://example.com/page"), None);
        assert_eq!(path_extension("https://example.com/"), None);
    }
}
