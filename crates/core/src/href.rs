//! Location normalization and equality.
//!
//! Redirect-loop suppression needs an equality check that is robust to hash
//! fragments and query-string ordering, and that can compare a relative
//! redirect target against an absolute current href.

/// A normalized view of an href.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Normalized {
    /// `scheme://host[:port]`, lowercased. `None` for app-relative hrefs.
    origin: Option<String>,
    path: String,
    /// Query pairs, sorted.
    query: Vec<(String, String)>,
}

fn split_origin(href: &str) -> (Option<&str>, &str) {
    let Some(scheme_end) = href.find("://") else {
        return (None, href);
    };
    let rest = &href[scheme_end + 3..];
    let origin_end = rest
        .find(['/', '?', '#'])
        .map(|i| scheme_end + 3 + i)
        .unwrap_or(href.len());
    (Some(&href[..origin_end]), &href[origin_end..])
}

fn normalize(href: &str) -> Normalized {
    let (origin, rest) = split_origin(href.trim());

    // Fragments never participate in location identity.
    let rest = rest.split('#').next().unwrap_or("");
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };

    let mut path = if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    };
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    let mut pairs: Vec<(String, String)> = query
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect();
    pairs.sort();

    Normalized {
        origin: origin.map(|o| o.to_ascii_lowercase()),
        path,
        query: pairs,
    }
}

/// Canonical string form of `href`: fragment dropped, query pairs sorted,
/// trailing slash trimmed from a non-root path.
pub fn normalize_href(href: &str) -> String {
    let n = normalize(href);
    let mut out = n.origin.unwrap_or_default();
    out.push_str(&n.path);
    for (i, (key, value)) in n.query.iter().enumerate() {
        out.push(if i == 0 { '?' } else { '&' });
        out.push_str(key);
        if !value.is_empty() {
            out.push('=');
            out.push_str(value);
        }
    }
    out
}

/// The normalized path component of `href` (no origin, no query).
pub fn href_path(href: &str) -> String {
    normalize(href).path
}

/// The `scheme://host[:port]` part of `href`, if it has one.
pub fn href_origin(href: &str) -> Option<String> {
    normalize(href).origin
}

/// Whether `target` points at the same location as `current`.
///
/// When either side is app-relative, only path + query are compared; when
/// both carry an origin, origins must match as well (case-insensitively).
pub fn equal_href(current: &str, target: &str) -> bool {
    let current = normalize(current);
    let target = normalize(target);
    let origins_match = match (&current.origin, &target.origin) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };
    origins_match && current.path == target.path && current.query == target.query
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn relative_target_matches_absolute_current() {
        assert!(equal_href(
            "https://site.example/users/login",
            "/users/login"
        ));
    }

    #[test]
    fn fragment_is_ignored() {
        assert!(equal_href("/questions/1#answer-2", "/questions/1"));
    }

    #[test]
    fn query_order_is_ignored() {
        assert!(equal_href(
            "https://site.example/users/login?b=2&a=1",
            "/users/login?a=1&b=2"
        ));
    }

    #[test]
    fn trailing_slash_is_ignored_on_non_root() {
        assert!(equal_href("/tags/", "/tags"));
        assert!(equal_href("https://site.example/", "https://site.example"));
    }

    #[test]
    fn different_paths_differ() {
        assert!(!equal_href("/questions", "/tags"));
        assert!(!equal_href("/users/login?status=inactive", "/users/login"));
    }

    #[test]
    fn different_origins_differ() {
        assert!(!equal_href(
            "https://site.example/signup",
            "https://agent.example/signup"
        ));
    }

    #[test]
    fn origin_comparison_is_case_insensitive() {
        assert!(equal_href(
            "https://Site.Example/users/login",
            "https://site.example/users/login"
        ));
    }

    #[test]
    fn bare_origin_normalizes_to_root() {
        assert_eq!(normalize_href("https://site.example"), "https://site.example/");
        assert_eq!(href_path("https://site.example"), "/");
    }

    #[test]
    fn path_extraction_drops_origin_and_query() {
        assert_eq!(
            href_path("https://site.example/users/login?status=inactive#x"),
            "/users/login"
        );
        assert_eq!(href_origin("/users/login"), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: equality is reflexive for any printable href.
        #[test]
        fn equality_is_reflexive(href in "[a-z0-9/?&=#._-]{0,40}") {
            prop_assert!(equal_href(&href, &href));
        }

        /// Property: normalization is idempotent.
        #[test]
        fn normalization_is_idempotent(href in "[a-z0-9/?&=#._-]{0,40}") {
            let once = normalize_href(&href);
            prop_assert_eq!(normalize_href(&once), once);
        }
    }
}
