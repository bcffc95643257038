//! # Utility Functions Module
//!
//! Small string helpers shared by the gateway and the services.

/// Longest body excerpt written to logs and error messages
pub const MAX_LOGGED_BODY: usize = 2000;

/// Cut `text` to `max` characters, noting how many bytes were dropped
pub fn truncate_body(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!(
            "{}... (truncated {} bytes)",
            &text[..cut],
            text.len() - cut
        ),
        None => text.to_string(),
    }
}

/// Join URL segments with exactly one slash between them
pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            continue;
        }
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// Absolute URLs are passed to the gateway verbatim
pub fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Hide all but the scheme of an `Authorization` value
pub fn redact_authorization(value: &str) -> String {
    match value.split_once(' ') {
        Some((scheme, _)) => format!("{} ***", scheme),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short", 10), "short");
        assert_eq!(
            truncate_body("abcdefghij", 4),
            "abcd... (truncated 6 bytes)"
        );
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let truncated = truncate_body("ééé", 1);
        assert_eq!(truncated, "é... (truncated 4 bytes)");
    }

    #[test]
    fn test_join_url_collapses_slashes() {
        assert_eq!(
            join_url("https://api.example/", &["/v1/", "/Plan/me"]),
            "https://api.example/v1/Plan/me"
        );
        assert_eq!(
            join_url("https://api.example", &["", "connect/token"]),
            "https://api.example/connect/token"
        );
    }

    #[test]
    fn test_redact_authorization() {
        assert_eq!(redact_authorization("Bearer abc.def"), "Bearer ***");
        assert_eq!(redact_authorization("opaque"), "***");
    }
}
