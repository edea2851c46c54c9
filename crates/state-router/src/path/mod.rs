/// Path utilities for splitting and classifying URL paths
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

/// Splits a path into its non-empty components
///
/// # Examples
///
/// ```
/// use state_router::path::split_path;
///
/// assert_eq!(split_path("/a//b/"), vec!["a", "b"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Separates the pathname from an optional query string
///
/// # Examples
///
/// ```
/// use state_router::path::split_query;
///
/// assert_eq!(split_query("/a/b?x=1"), ("/a/b", Some("x=1")));
/// assert_eq!(split_query("/a/b"), ("/a/b", None));
/// ```
pub fn split_query(path: &str) -> (&str, Option<&str>) {
    match path.split_once('?') {
        Some((pathname, query)) => (pathname, Some(query)),
        None => (path, None),
    }
}

/// True iff every `/`-separated component of the path is empty
///
/// # Examples
///
/// ```
/// use state_router::path::is_root;
///
/// assert!(is_root("/"));
/// assert!(is_root(""));
/// assert!(is_root("//"));
/// assert!(!is_root("/desk"));
/// ```
pub fn is_root(path: &str) -> bool {
    path.split('/').all(str::is_empty)
}
