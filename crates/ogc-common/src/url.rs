//! URL normalization helpers.
//!
//! Servers publish links that are absolute, host-relative (`/path`),
//! dot-relative (`./path`) or bare relative (`path`). These helpers turn them
//! into absolute request URLs without pulling in a full URL parser, so that
//! proxy-style relative roots (`../api/proxy/123`) keep working.

/// Strip the query string and guarantee exactly one trailing slash.
pub fn clean_url(url: &str) -> String {
    let path = strip_query(url).trim_end_matches('/');
    format!("{}/", path)
}

/// Strip the query string and any trailing slash.
pub fn clean_url_to_asset(url: &str) -> String {
    strip_query(url).trim_end_matches('/').to_string()
}

/// `scheme//host[:port]` of an absolute URL, or `""` for anything else.
pub fn host_url(url: &str) -> String {
    if !url.starts_with("http") {
        return String::new();
    }
    let segments: Vec<&str> = url.split('/').collect();
    let scheme = segments.first().copied().unwrap_or_default();
    let host = segments.get(2).copied().unwrap_or_default();
    format!("{}//{}", scheme, host)
}

/// Resolve a link `href` against a host returned by [`host_url`].
pub fn resolve_against_host(url: &str, host: &str) -> String {
    if is_absolute(url) {
        return url.to_string();
    }
    if url.starts_with('/') {
        return format!("{}{}", host, url);
    }
    if let Some(rest) = url.strip_prefix('.') {
        if rest.starts_with('/') {
            return format!("{}{}", host, rest);
        }
    }
    format!("{}/{}", host, url)
}

/// True for `http://` and `https://` URLs.
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Value of the first `f=` parameter in the query string, if any.
pub fn format_in_query(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("f="))
        .map(str::to_string)
}

/// Drop a trailing `.ext` from the last path segment (`items.json` -> `items`).
pub fn strip_extension(url: &str) -> String {
    match url.rfind('.') {
        Some(dot) => {
            let ext = &url[dot + 1..];
            if !ext.is_empty() && !ext.contains('/') {
                url[..dot].to_string()
            } else {
                url.to_string()
            }
        }
        None => url.to_string(),
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url() {
        assert_eq!(
            clean_url("http://localhost:8080/api?f=json"),
            "http://localhost:8080/api/"
        );
        assert_eq!(
            clean_url("http://localhost:8080/api/"),
            "http://localhost:8080/api/"
        );
    }

    #[test]
    fn test_clean_url_to_asset() {
        assert_eq!(
            clean_url_to_asset("http://localhost/collections/lakes/items/?f=json"),
            "http://localhost/collections/lakes/items"
        );
    }

    #[test]
    fn test_host_url() {
        assert_eq!(host_url("../api/user/proxy/auto_123"), "");
        assert_eq!(
            host_url("http://localhost:8080/api/x"),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_resolve_against_host() {
        let host = "https://example.com";
        assert_eq!(
            resolve_against_host("https://other.org/a", host),
            "https://other.org/a"
        );
        assert_eq!(resolve_against_host("/a/b", host), "https://example.com/a/b");
        assert_eq!(resolve_against_host("./a/b", host), "https://example.com/a/b");
        assert_eq!(resolve_against_host("a/b", host), "https://example.com/a/b");
    }

    #[test]
    fn test_format_in_query() {
        assert_eq!(
            format_in_query("https://x.org/items?limit=10&f=json"),
            Some("json".to_string())
        );
        assert_eq!(format_in_query("https://x.org/items"), None);
        assert_eq!(format_in_query("https://x.org/items?ff=json"), None);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(
            strip_extension("https://x.org/collections/lakes/items.json"),
            "https://x.org/collections/lakes/items"
        );
        assert_eq!(
            strip_extension("https://x.org/collections/lakes/items"),
            "https://x.org/collections/lakes/items"
        );
    }
}
