/// Matching of state objects against route trees
///
/// Depth-first, first-match-wins over children: siblings are tried in
/// declaration order and the first one that matches at least one node is
/// taken. Later siblings are never consulted, even if they would explain more
/// of the state.
use serde_json::Value;

use crate::node::Router;
use crate::{State, SEARCH_PARAMS_KEY};

/// Outcome of matching a state against a route tree
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Chain from the node matched against down to the deepest matched node
    pub nodes: Vec<Router>,
    /// Params required by the attempted chain but absent from the state
    pub missing: Vec<String>,
    /// State keys no route could consume
    pub remaining: Vec<String>,
}

impl MatchResult {
    fn leaf(node: &Router) -> Self {
        Self {
            nodes: vec![node.clone()],
            ..Self::default()
        }
    }

    fn missing(missing: Vec<String>) -> Self {
        Self {
            missing,
            ..Self::default()
        }
    }

    fn remaining(remaining: Vec<String>) -> Self {
        Self {
            remaining,
            ..Self::default()
        }
    }

    pub fn is_match(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Raw patterns of the matched chain, mostly useful for diagnostics
    pub fn patterns(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.pattern().raw()).collect()
    }
}

/// Returns the part of `state` a node reads from: the scoped object if the
/// node is scoped, the state itself otherwise
///
/// A missing or non-object scope value reads as empty.
pub(crate) fn local_state<'a>(node: &Router, state: &'a State, empty: &'a State) -> &'a State {
    match node.scope() {
        Some(scope) => state.get(scope).and_then(Value::as_object).unwrap_or(empty),
        None => state,
    }
}

/// Finds the node chain able to represent `state` (pure function)
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use state_router::{find_matching_nodes, route};
///
/// let router = route("/:dataset")
///     .with_child(route("/settings/:setting").build().unwrap())
///     .build()
///     .unwrap();
///
/// let state = json!({"dataset": "production", "setting": "members"});
/// let result = find_matching_nodes(&router, state.as_object().unwrap());
/// assert_eq!(result.patterns(), vec!["/:dataset", "/settings/:setting"]);
///
/// let state = json!({"setting": "members"});
/// let result = find_matching_nodes(&router, state.as_object().unwrap());
/// assert_eq!(result.missing, vec!["dataset"]);
/// ```
pub fn find_matching_nodes(node: &Router, state: &State) -> MatchResult {
    let empty = State::new();
    let local = local_state(node, state, &empty);

    let required: Vec<&str> = node.pattern().param_names().collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|param| !local.contains_key(**param))
        .map(|param| param.to_string())
        .collect();

    if !missing.is_empty() {
        return MatchResult::missing(missing);
    }

    let remaining: Vec<String> = local
        .keys()
        .filter(|key| key.as_str() != SEARCH_PARAMS_KEY && !required.contains(&key.as_str()))
        .cloned()
        .collect();

    if remaining.is_empty() {
        return MatchResult::leaf(node);
    }

    let children = node.children_for(local);
    if children.is_empty() {
        return MatchResult::remaining(remaining);
    }

    let remaining_state: State = remaining
        .iter()
        .filter_map(|key| local.get(key).map(|value| (key.clone(), value.clone())))
        .collect();

    let child_match = children
        .iter()
        .map(|child| find_matching_nodes(child, &remaining_state))
        .find(MatchResult::is_match);

    match child_match {
        Some(child_match) => {
            let mut nodes = Vec::with_capacity(child_match.nodes.len() + 1);
            nodes.push(node.clone());
            nodes.extend(child_match.nodes);
            MatchResult {
                nodes,
                missing: child_match.missing,
                remaining: child_match.remaining,
            }
        }
        None => MatchResult::remaining(remaining),
    }
}
