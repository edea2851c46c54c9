/// Per-parameter value codecs
///
/// A transform converts one path component into a state value and back.
/// Authors must keep `to_state(&to_path(x)) == x` for state the router encodes,
/// otherwise `decode(encode(state))` will not reproduce `state`.
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Bidirectional codec registered for a single parameter name
pub trait Transform: Send + Sync {
    /// Path component → state value
    fn to_state(&self, segment: &str) -> Value;

    /// State value → path component
    fn to_path(&self, value: &Value) -> String;
}

/// Transform built from a pair of closures
///
/// # Examples
///
/// ```
/// use serde_json::{json, Value};
/// use state_router::transform::{transform, Transform};
///
/// let upper = transform(
///     |s: &str| Value::String(s.to_uppercase()),
///     |v: &Value| v.as_str().unwrap_or_default().to_lowercase(),
/// );
///
/// assert_eq!(upper.to_state("banana"), json!("BANANA"));
/// assert_eq!(upper.to_path(&json!("BANANA")), "banana");
/// ```
pub struct FnTransform<S, P> {
    to_state: S,
    to_path: P,
}

impl<S, P> Transform for FnTransform<S, P>
where
    S: Fn(&str) -> Value + Send + Sync,
    P: Fn(&Value) -> String + Send + Sync,
{
    fn to_state(&self, segment: &str) -> Value {
        (self.to_state)(segment)
    }

    fn to_path(&self, value: &Value) -> String {
        (self.to_path)(value)
    }
}

impl<S, P> fmt::Debug for FnTransform<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransform").finish_non_exhaustive()
    }
}

/// Creates a transform from closures
pub fn transform<S, P>(to_state: S, to_path: P) -> FnTransform<S, P>
where
    S: Fn(&str) -> Value + Send + Sync,
    P: Fn(&Value) -> String + Send + Sync,
{
    FnTransform { to_state, to_path }
}

/// Shared handle to a transform stored on a route node
pub type SharedTransform = Arc<dyn Transform>;

/// Renders a state value as a path component when no transform is registered
///
/// Strings pass through unchanged; other values use their JSON text.
pub fn value_to_segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
