//! YouTube video id extraction

use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)").expect("valid video id regex")
});

/// Extract the video id from a `watch?v=` or `youtu.be/` URL
///
/// Returns an empty string when the URL has neither shape. The extractor
/// does not validate URLs; an empty id is left for the provider to reject.
pub fn extract_id(url: &str) -> String {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_id("https://www.youtube.com/watch?v=abc123&t=5"),
            "abc123"
        );
        assert_eq!(
            extract_id("https://youtube.com/watch?v=dQw4w9WgXcQ"),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_id("https://youtu.be/abc123"), "abc123");
        assert_eq!(extract_id("https://youtu.be/abc123?si=share"), "abc123");
        assert_eq!(extract_id("https://youtu.be/abc123#t=30"), "abc123");
    }

    #[test]
    fn test_stops_at_newline() {
        assert_eq!(extract_id("https://youtu.be/abc123\nmore"), "abc123");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_id("https://example.com"), "");
        assert_eq!(extract_id(""), "");
        assert_eq!(extract_id("https://www.youtube.com/shorts/abc123"), "");
    }
}
