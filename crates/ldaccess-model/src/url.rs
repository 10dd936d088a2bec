//! URL string helpers used when walking the container hierarchy.

/// Strip a `#fragment` from a URL.
///
/// ```
/// use ldaccess_model::url::strip_fragment;
///
/// assert_eq!(strip_fragment("https://pod.example/p.ttl#rule"), "https://pod.example/p.ttl");
/// assert_eq!(strip_fragment("https://pod.example/p.ttl"), "https://pod.example/p.ttl");
/// ```
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Check whether a URL names a Container (its path ends in `/`).
pub fn is_container_url(url: &str) -> bool {
    strip_query(strip_fragment(url)).ends_with('/')
}

/// Index where the path starts, after `scheme://authority`.
fn path_start(url: &str) -> usize {
    let after_scheme = url.find("://").map(|idx| idx + 3).unwrap_or(0);
    url[after_scheme..]
        .find('/')
        .map(|idx| after_scheme + idx)
        .unwrap_or(url.len())
}

fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Check whether a URL is the root Container of its origin.
pub fn is_root_container(url: &str) -> bool {
    let base = strip_query(strip_fragment(url));
    let path = &base[path_start(base)..];
    path.is_empty() || path == "/"
}

/// The URL of the Container directly holding `url`.
///
/// Strips the final non-empty path segment. Returns `None` for the root
/// Container, which has no parent.
///
/// # Example
///
/// ```
/// use ldaccess_model::url::container_parent_url;
///
/// assert_eq!(
///     container_parent_url("https://pod.example/foo/bar.ttl").as_deref(),
///     Some("https://pod.example/foo/")
/// );
/// assert_eq!(
///     container_parent_url("https://pod.example/foo/").as_deref(),
///     Some("https://pod.example/")
/// );
/// assert_eq!(container_parent_url("https://pod.example/"), None);
/// ```
pub fn container_parent_url(url: &str) -> Option<String> {
    if is_root_container(url) {
        return None;
    }
    let base = strip_query(strip_fragment(url));
    let trimmed = base.trim_end_matches('/');
    let start = path_start(trimmed);
    let last_slash = trimmed[start..].rfind('/')? + start;
    Some(trimmed[..=last_slash].to_string())
}

/// All ancestor Containers of `url`, nearest first, ending with the root.
pub fn ancestor_containers(url: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = url.to_string();
    while let Some(parent) = container_parent_url(&current) {
        out.push(parent.clone());
        current = parent;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_of_nested_resource() {
        assert_eq!(
            container_parent_url("https://pod.example/a/b/c.ttl").as_deref(),
            Some("https://pod.example/a/b/")
        );
    }

    #[test]
    fn test_parent_ignores_query_and_fragment() {
        assert_eq!(
            container_parent_url("https://pod.example/a/doc?x=1#frag").as_deref(),
            Some("https://pod.example/a/")
        );
    }

    #[test]
    fn test_root_has_no_parent() {
        assert!(is_root_container("https://pod.example/"));
        assert!(is_root_container("https://pod.example"));
        assert_eq!(container_parent_url("https://pod.example"), None);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        assert_eq!(
            ancestor_containers("https://pod.example/a/b/c.ttl"),
            vec![
                "https://pod.example/a/b/".to_string(),
                "https://pod.example/a/".to_string(),
                "https://pod.example/".to_string(),
            ]
        );
    }

    #[test]
    fn test_is_container_url() {
        assert!(is_container_url("https://pod.example/a/"));
        assert!(!is_container_url("https://pod.example/a"));
    }
}
