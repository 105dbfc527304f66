//! Utility functions and helpers

use url::Url;

/// Host component of a URL, used as the aggregation key.
///
/// "www.example.com" and "example.com" are different hosts. A URL without a
/// host (e.g. `mailto:`) yields an empty string.
pub fn extract_hostname(raw_url: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(raw_url)?;
    let host = match parsed.host() {
        Some(url::Host::Ipv6(addr)) => addr.to_string(),
        Some(host) => host.to_string(),
        None => String::new(),
    };
    Ok(host)
}

/// Whether a URL uses a scheme the HTTP client can send
pub fn is_http_url(raw_url: &str) -> bool {
    Url::parse(raw_url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Shorten long strings (request bodies) for logging
pub fn truncate_for_logging(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hostname() {
        assert_eq!(extract_hostname("https://fetch.com/careers").unwrap(), "fetch.com");
        assert_eq!(
            extract_hostname("https://www.fetchrewards.com/").unwrap(),
            "www.fetchrewards.com"
        );
        assert_eq!(extract_hostname("http://127.0.0.1:8080/health").unwrap(), "127.0.0.1");
        assert_eq!(extract_hostname("http://[::1]:8080/").unwrap(), "::1");
        assert_eq!(extract_hostname("HTTP://Example.COM/").unwrap(), "example.com");
        assert_eq!(extract_hostname("mailto:ops@example.com").unwrap(), "");
        assert!(extract_hostname("not a url").is_err());
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("https://example.com/path"));
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn test_truncate_for_logging() {
        assert_eq!(truncate_for_logging("short", 10), "short");
        assert_eq!(truncate_for_logging("verylongstring", 10), "verylongst...");
    }
}
