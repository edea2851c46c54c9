/// State → path resolution
use serde_json::Value;

use crate::error::RouteError;
use crate::matcher::find_matching_nodes;
use crate::node::Router;
use crate::route::SegmentKind;
use crate::search::{format_query, pairs_at, ScopedParam};
use crate::transform::value_to_segment;
use crate::State;

/// Renders `state` as a path through the node chain the matcher selects
///
/// # Errors
///
/// - `RouteError::UnmappableKeys` when state keys cannot be consumed by any route
/// - `RouteError::Unresolvable` when required params are absent so no chain matches
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use state_router::{resolve_path_from_state, route};
///
/// let router = route("/foo/:bar").build().unwrap();
/// let state = json!({"bar": "baz"});
/// assert_eq!(
///     resolve_path_from_state(&router, state.as_object().unwrap()).unwrap(),
///     "/foo/baz"
/// );
/// ```
pub fn resolve_path_from_state(root: &Router, state: &State) -> Result<String, RouteError> {
    tracing::debug!(?state, "resolving path from state");

    let result = find_matching_nodes(root, state);

    if !result.remaining.is_empty() {
        return Err(RouteError::UnmappableKeys(result.remaining));
    }

    if result.nodes.is_empty() {
        return Err(RouteError::Unresolvable(Value::Object(state.clone()).to_string()));
    }

    let empty = State::new();
    let mut scoped = state;
    let mut scope_path: Vec<String> = Vec::new();
    let mut search = scoped_pairs(&scope_path, scoped);
    let mut segments: Vec<String> = Vec::new();

    for node in &result.nodes {
        if let Some(scope) = node.scope() {
            if scoped.contains_key(scope) {
                scoped = scoped.get(scope).and_then(Value::as_object).unwrap_or(&empty);
                scope_path.push(scope.to_string());
                search.extend(scoped_pairs(&scope_path, scoped));
            }
        }

        for segment in node.pattern().segments() {
            let rendered = match segment.kind {
                SegmentKind::Dir => segment.name.clone(),
                SegmentKind::Param => {
                    let value = scoped.get(&segment.name).unwrap_or(&Value::Null);
                    match node.transform_for(&segment.name) {
                        Some(transform) => transform.to_path(value),
                        None => value_to_segment(value),
                    }
                }
            };
            segments.push(rendered);
        }
    }

    let mut path = format!("/{}", segments.join("/"));
    if root.config().search_params && !search.is_empty() {
        path.push('?');
        path.push_str(&format_query(&search));
    }

    tracing::debug!(%path, "resolved path");
    Ok(path)
}

fn scoped_pairs(scope_path: &[String], level: &State) -> Vec<ScopedParam> {
    pairs_at(level)
        .into_iter()
        .map(|(key, value)| {
            let mut path = scope_path.to_vec();
            path.push(key);
            (path, value)
        })
        .collect()
}
