//! Website URL normalization and logo URL synthesis.
//!
//! The deduplication key for tools is the *normalized domain*: the
//! hostname of the submitted website with a leading `www.` stripped.
//! Slugs can collide across genuinely different products; domains cannot.

/// Placeholder logo used when no logo is supplied and no favicon can be
/// derived.
pub const PLACEHOLDER_LOGO: &str = "https://via.placeholder.com/128?text=AI";

/// Extract the normalized domain from a website URL.
///
/// Returns `None` when the input is not an absolute URL with a scheme and
/// a non-empty host. Callers treat `None` as "cannot deduplicate" and let
/// the record through, matching how submissions with malformed URLs have
/// always been accepted.
///
/// Normalization: hostname only (no userinfo, port, path, query or
/// fragment), lowercased, leading `www.` stripped.
///
/// # Examples
///
/// ```
/// use aidex_core::website::normalize_domain;
///
/// assert_eq!(normalize_domain("https://Foo.com/"), Some("foo.com".into()));
/// assert_eq!(normalize_domain("https://www.foo.com"), Some("foo.com".into()));
/// assert_eq!(normalize_domain("not a url"), None);
/// ```
pub fn normalize_domain(website: &str) -> Option<String> {
    let rest = website.trim();
    let rest = rest
        .strip_prefix("https://")
        .or_else(|| rest.strip_prefix("http://"))
        .or_else(|| strip_prefix_ignore_case(rest, "https://"))
        .or_else(|| strip_prefix_ignore_case(rest, "http://"))?;

    // Authority ends at the first path/query/fragment delimiter.
    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    // Drop userinfo if present.
    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    // Drop a port. Bracketed IPv6 hosts are not meaningful dedup keys for
    // a public directory, so the plain colon split is enough here.
    let host = host_port.split(':').next().unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }

    let host = host.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    if host.is_empty() {
        return None;
    }

    Some(host.to_string())
}

/// Synthesize a favicon URL for a domain via Google's favicon service.
pub fn favicon_url(domain: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={domain}&sz=128")
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_www_and_lowercases() {
        assert_eq!(
            normalize_domain("https://www.Foo.com"),
            Some("foo.com".to_string())
        );
    }

    #[test]
    fn trailing_path_ignored() {
        assert_eq!(
            normalize_domain("https://foo.com/pricing?ref=x#top"),
            Some("foo.com".to_string())
        );
    }

    #[test]
    fn http_scheme_accepted() {
        assert_eq!(
            normalize_domain("http://bar.io"),
            Some("bar.io".to_string())
        );
    }

    #[test]
    fn uppercase_scheme_accepted() {
        assert_eq!(
            normalize_domain("HTTPS://Foo.com"),
            Some("foo.com".to_string())
        );
    }

    #[test]
    fn port_and_userinfo_dropped() {
        assert_eq!(
            normalize_domain("https://user:pw@foo.com:8443/x"),
            Some("foo.com".to_string())
        );
    }

    #[test]
    fn missing_scheme_is_none() {
        assert_eq!(normalize_domain("foo.com"), None);
        assert_eq!(normalize_domain("www.foo.com"), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(normalize_domain(""), None);
        assert_eq!(normalize_domain("not a url"), None);
        assert_eq!(normalize_domain("https://"), None);
        assert_eq!(normalize_domain("https://www."), None);
    }

    #[test]
    fn equivalent_urls_share_a_key() {
        let a = normalize_domain("https://Foo.com/");
        let b = normalize_domain("https://www.foo.com");
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn favicon_url_format() {
        assert_eq!(
            favicon_url("foo.com"),
            "https://www.google.com/s2/favicons?domain=foo.com&sz=128"
        );
    }
}
