use crate::error::{LiftError, Result};
use url::Url;

/// Complete a URL typed by a user: bare domains get `https://`, local hosts
/// get `http://`, anything with a scheme is kept
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.contains("://") || trimmed.starts_with("data:") || trimmed.starts_with("about:") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}

/// Accept only public http(s) URLs
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| LiftError::InvalidUrl("Please enter a valid URL.".to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LiftError::InvalidUrl("Only http and https URLs are allowed.".to_string()));
    }

    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    if host == "localhost"
        || host == "127.0.0.1"
        || host.starts_with("192.168.")
        || host.starts_with("10.")
        || host.ends_with(".local")
    {
        return Err(LiftError::InvalidUrl("Local and private URLs are not allowed.".to_string()));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_keeps_schemes() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com/path"), "http://example.com/path");
        assert_eq!(normalize_url("about:blank"), "about:blank");
        assert_eq!(normalize_url("file:///tmp/page.html"), "file:///tmp/page.html");
    }

    #[test]
    fn test_normalize_url_adds_scheme() {
        assert_eq!(normalize_url("  stripe.com  "), "https://stripe.com");
        assert_eq!(normalize_url("sub.example.com/pricing"), "https://sub.example.com/pricing");
        assert_eq!(normalize_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_url("127.0.0.1"), "http://127.0.0.1");
    }

    #[test]
    fn test_validate_url_accepts_public_hosts() {
        let url = validate_url("https://tailwindcss.com/docs").unwrap();
        assert_eq!(url.host_str(), Some("tailwindcss.com"));
        assert!(validate_url("http://example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejections() {
        let message = |u: &str| validate_url(u).unwrap_err().to_string();

        assert_eq!(message("not a url"), "Invalid URL: Please enter a valid URL.");
        let scheme = "Invalid URL: Only http and https URLs are allowed.";
        assert_eq!(message("ftp://example.com"), scheme);
        assert_eq!(message("file:///etc/passwd"), scheme);

        for local in [
            "http://localhost:3000",
            "http://127.0.0.1/",
            "http://192.168.1.4",
            "https://10.0.0.1",
            "http://printer.local",
            "http://LOCALHOST",
        ] {
            assert_eq!(
                message(local),
                "Invalid URL: Local and private URLs are not allowed.",
                "{}",
                local
            );
        }
    }
}
