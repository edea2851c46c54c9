/// Query string codec for `_searchParams`
///
/// Every state level may carry `_searchParams`, a list of `[key, value]`
/// pairs. Pairs of scoped levels are written with bracketed keys, so
/// `{desk: {_searchParams: [["view", "list"]]}}` becomes `desk[view]=list`.
use serde_json::Value;

use crate::transform::value_to_segment;
use crate::{State, SEARCH_PARAMS_KEY};

/// A query pair addressed by its scope path; the last element is the key
pub type ScopedParam = (Vec<String>, String);

/// Splits `a[b][c]` into `["a", "b", "c"]`
///
/// Keys that are not well-formed bracket paths are kept whole.
///
/// # Examples
///
/// ```
/// use state_router::search::split_scoped_key;
///
/// assert_eq!(split_scoped_key("desk[view]"), vec!["desk", "view"]);
/// assert_eq!(split_scoped_key("plain"), vec!["plain"]);
/// assert_eq!(split_scoped_key("broken[key"), vec!["broken[key"]);
/// ```
pub fn split_scoped_key(key: &str) -> Vec<String> {
    let Some(open) = key.find('[') else {
        return vec![key.to_string()];
    };

    let head = &key[..open];
    if head.is_empty() {
        return vec![key.to_string()];
    }

    let mut parts = vec![head.to_string()];
    let mut rest = &key[open..];
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.split_once(']'))
            .filter(|(part, _)| !part.is_empty() && !part.contains('['));

        match inner {
            Some((part, tail)) => {
                parts.push(part.to_string());
                rest = tail;
            }
            None => return vec![key.to_string()],
        }
    }
    parts
}

/// Inverse of `split_scoped_key`
pub fn join_scoped_key(path: &[String]) -> String {
    match path.split_first() {
        Some((head, rest)) => rest
            .iter()
            .fold(head.clone(), |key, part| format!("{key}[{part}]")),
        None => String::new(),
    }
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Parses a query string into scoped pairs, in order
pub fn parse_query(query: &str) -> Vec<ScopedParam> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                split_scoped_key(&decode_component(key)),
                decode_component(value),
            )
        })
        .collect()
}

/// Formats scoped pairs as a query string (without the leading `?`)
pub fn format_query(params: &[ScopedParam]) -> String {
    params
        .iter()
        .map(|(path, value)| {
            format!(
                "{}={}",
                urlencoding::encode(&join_scoped_key(path)),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Reads the `_searchParams` pairs stored directly on one state level
pub(crate) fn pairs_at(state: &State) -> Vec<(String, String)> {
    state
        .get(SEARCH_PARAMS_KEY)
        .and_then(Value::as_array)
        .map(|pairs| {
            pairs
                .iter()
                .filter_map(Value::as_array)
                .filter_map(|pair| match pair.as_slice() {
                    [key, value, ..] => Some((value_to_segment(key), value_to_segment(value))),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Appends one pair to the `_searchParams` list of a state level
pub(crate) fn push_pair(state: &mut State, key: String, value: String) {
    let entry = state
        .entry(SEARCH_PARAMS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));

    if !entry.is_array() {
        *entry = Value::Array(Vec::new());
    }
    if let Value::Array(pairs) = entry {
        pairs.push(Value::Array(vec![Value::String(key), Value::String(value)]));
    }
}

/// Places decoded pairs into the state levels named by their scope paths
///
/// A pair whose scope is absent from `state` is kept whole at the root level,
/// so a root key that merely contains brackets (`filter[x]`) is not lost.
pub(crate) fn distribute(state: &mut State, params: Vec<ScopedParam>) {
    for (mut path, value) in params {
        let Some(key) = path.pop() else {
            continue;
        };

        match level_mut(state, &path) {
            Some(level) => push_pair(level, key, value),
            None => {
                path.push(key);
                let key = join_scoped_key(&path);
                tracing::debug!(%key, "no decoded scope for search param, keeping it at the root");
                push_pair(state, key, value);
            }
        }
    }
}

fn level_mut<'a>(state: &'a mut State, path: &[String]) -> Option<&'a mut State> {
    match path.split_first() {
        None => Some(state),
        Some((scope, rest)) => {
            let nested = state.get_mut(scope)?.as_object_mut()?;
            level_mut(nested, rest)
        }
    }
}
