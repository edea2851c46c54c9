/// Path → state resolution
use serde_json::Value;

use crate::node::Router;
use crate::path::{split_path, split_query};
use crate::route::SegmentKind;
use crate::search::{distribute, parse_query};
use crate::State;

/// Decodes a path into state, or `None` when no route chain matches
///
/// The query string is never matched against routes; when search params are
/// enabled it is decoded into `_searchParams` of the matching state levels.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use state_router::{resolve_state_from_path, route};
///
/// let router = route("/foo/:bar").build().unwrap();
/// let state = resolve_state_from_path(&router, "/foo/baz").unwrap();
/// assert_eq!(serde_json::Value::Object(state), json!({"bar": "baz"}));
///
/// assert!(resolve_state_from_path(&router, "/nope/baz").is_none());
/// ```
pub fn resolve_state_from_path(root: &Router, path: &str) -> Option<State> {
    tracing::debug!(path, "resolving state from path");

    let (pathname, query) = split_query(path);
    let parts = split_path(pathname);

    let mut state = match_path(root, &parts);

    if let (Some(state), Some(query)) = (state.as_mut(), query) {
        if root.config().search_params {
            distribute(state, parse_query(query));
        }
    }

    tracing::debug!(?state, "resolved");
    state
}

/// Matches one node and, recursively, its children against `parts`
///
/// Bindings go into a map owned by this call, so a failed attempt never
/// leaks partial state into a sibling's result.
fn match_path(node: &Router, parts: &[&str]) -> Option<State> {
    let segments = node.pattern().segments();
    if parts.len() < segments.len() {
        return None;
    }

    let mut local = State::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment.kind {
            SegmentKind::Dir => {
                if segment.name != *part {
                    return None;
                }
            }
            SegmentKind::Param => {
                let value = match node.transform_for(&segment.name) {
                    Some(transform) => transform.to_state(part),
                    None => Value::String(part.to_string()),
                };
                local.insert(segment.name.clone(), value);
            }
        }
    }

    let rest = &parts[segments.len()..];
    let child_state = node
        .children_for(&local)
        .iter()
        .find_map(|child| match_path(child, rest));

    match child_state {
        Some(child_state) => local.extend(child_state),
        None if !rest.is_empty() => return None,
        None => {}
    }

    match node.scope() {
        Some(scope) => {
            let mut wrapped = State::new();
            wrapped.insert(scope.to_string(), Value::Object(local));
            Some(wrapped)
        }
        None => Some(local),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{route, scope};
    use crate::transform::transform;
    use serde_json::json;

    fn decode(router: &Router, path: &str) -> Option<Value> {
        resolve_state_from_path(router, path).map(Value::Object)
    }

    #[test]
    fn test_too_few_parts_fails() {
        let router = route("/foo/:bar").build().unwrap();
        assert_eq!(decode(&router, "/foo"), None);
    }

    #[test]
    fn test_unconsumed_path_fails() {
        let router = route("/foo/:bar").build().unwrap();
        assert_eq!(decode(&router, "/foo/bar/extra"), None);
    }

    #[test]
    fn test_query_is_stripped_before_matching() {
        let router = route("/foo/:bar").build().unwrap();
        assert_eq!(decode(&router, "/foo/baz?"), Some(json!({"bar": "baz"})));
    }

    #[test]
    fn test_transform_to_state() {
        let router = route("/root/:param")
            .with_transform(
                "param",
                transform(
                    |s: &str| Value::String(s.to_uppercase()),
                    |v: &Value| v.as_str().unwrap_or_default().to_lowercase(),
                ),
            )
            .build()
            .unwrap();

        assert_eq!(
            decode(&router, "/root/banana"),
            Some(json!({"param": "BANANA"}))
        );
    }

    #[test]
    fn test_failed_sibling_does_not_leak_bindings() {
        // `/:a/x` binds `a` before failing on `x`; the second sibling must not see it
        let first = route("/:a/x").build().unwrap();
        let second = route("/:b/y").build().unwrap();
        let router = route("/").with_children([first, second]).build().unwrap();

        assert_eq!(decode(&router, "/value/y"), Some(json!({"b": "value"})));
    }

    #[test]
    fn test_child_with_no_segments_matches_empty_rest() {
        let router = route("/base")
            .with_child(scope("pane", "/").build().unwrap())
            .build()
            .unwrap();

        assert_eq!(decode(&router, "/base"), Some(json!({"pane": {}})));
    }

    #[test]
    fn test_search_params_distributed_to_scopes() {
        let router = route("/:tool")
            .with_child(scope("desk", "/:pane").build().unwrap())
            .build()
            .unwrap();

        assert_eq!(
            decode(&router, "/desk/books?perspective=drafts&desk%5Bview%5D=list"),
            Some(json!({
                "tool": "desk",
                "_searchParams": [["perspective", "drafts"]],
                "desk": {"pane": "books", "_searchParams": [["view", "list"]]}
            }))
        );
    }

    #[test]
    fn test_search_params_can_be_disabled() {
        let config = crate::config::RouterConfig {
            search_params: false,
            ..Default::default()
        };
        let router = route("/:tool").with_config(config).build().unwrap();

        assert_eq!(decode(&router, "/desk?x=1"), Some(json!({"tool": "desk"})));
    }
}
