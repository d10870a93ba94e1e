//! Subdomain-aware domain matching.
//!
//! Both sides are normalized before comparison: surrounding whitespace is
//! trimmed, the string is lowercased and leading `www.` labels are stripped.
//! A candidate host matches a blocked domain when it is equal to it, is a
//! subdomain of it, or contains it anywhere. The last rule is deliberately
//! permissive: `myyoutube.com` matches `youtube.com`.

/// Normalize a host or domain for comparison.
///
/// Idempotent: `normalize_host(&normalize_host(x)) == normalize_host(x)`.
pub fn normalize_host(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut host = lowered.trim();
    while let Some(rest) = host.strip_prefix("www.") {
        host = rest.trim_start();
    }
    host.to_string()
}

/// Returns true when `candidate_host` should be treated as `blocked_domain`.
///
/// Empty inputs never match.
pub fn matches(candidate_host: &str, blocked_domain: &str) -> bool {
    let host = normalize_host(candidate_host);
    let blocked = normalize_host(blocked_domain);
    if host.is_empty() || blocked.is_empty() {
        return false;
    }

    host == blocked || host.ends_with(&format!(".{blocked}")) || host.contains(&blocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalizes_case_whitespace_and_www() {
        assert_eq!(normalize_host(" WWW.Example.COM "), "example.com");
        assert_eq!(normalize_host("example.com"), "example.com");
        assert_eq!(normalize_host("wwwexample.com"), "wwwexample.com");
    }

    #[test]
    fn repeated_www_prefixes_are_stripped() {
        assert_eq!(normalize_host("www.www.example.com"), "example.com");
        assert_eq!(normalize_host("www. www.example.com"), "example.com");
    }

    #[test]
    fn exact_match() {
        assert!(matches("youtube.com", "youtube.com"));
        assert!(matches("www.youtube.com", "youtube.com"));
        assert!(matches("YouTube.com", "www.youtube.com"));
    }

    #[test]
    fn subdomain_match() {
        assert!(matches("m.youtube.com", "youtube.com"));
        assert!(matches("a.b.youtube.com", "youtube.com"));
    }

    #[test]
    fn substring_fallback_is_permissive() {
        assert!(matches("myyoutube.com", "youtube.com"));
        assert!(matches("notyoutube.com.evil.test", "youtube.com"));
    }

    #[test]
    fn different_tld_does_not_match() {
        assert!(!matches("youtube.org", "youtube.com"));
        assert!(!matches("example.com", "youtube.com"));
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(!matches("", "youtube.com"));
        assert!(!matches("youtube.com", ""));
        assert!(!matches("youtube.com", "   "));
        assert!(!matches("anything.test", "www."));
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize_host(&raw);
            prop_assert_eq!(normalize_host(&once), once);
        }

        #[test]
        fn matching_is_stable_under_normalization(
            host in "[ A-Za-z0-9.\\-]{0,30}",
            blocked in "[ A-Za-z0-9.\\-]{0,20}",
        ) {
            prop_assert_eq!(matches(&normalize_host(&host), &blocked), matches(&host, &blocked));
        }

        #[test]
        fn never_panics(host in "\\PC{0,60}", blocked in "\\PC{0,30}") {
            let _ = matches(&host, &blocked);
        }
    }
}
