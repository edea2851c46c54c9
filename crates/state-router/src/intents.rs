/// Intent links
///
/// Deep links addressing an action by name: `<base>/:intent/:params/:payload`.
/// - `intent` names the action
/// - `params` carries simple `key=value` pairs joined by `;`
/// - `payload` carries an arbitrary JSON value, base64url-encoded
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::{Map, Value};

use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::node::{route, Router};
use crate::path::split_path;
use crate::transform::{value_to_segment, Transform};

/// Codec for the `:params` segment
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamsTransform;

impl Transform for ParamsTransform {
    fn to_state(&self, segment: &str) -> Value {
        Value::Object(decode_params(segment))
    }

    fn to_path(&self, value: &Value) -> String {
        value.as_object().map(encode_params).unwrap_or_default()
    }
}

/// Codec for the `:payload` segment
#[derive(Debug, Clone, Copy)]
pub struct PayloadTransform {
    legacy_json: bool,
}

impl PayloadTransform {
    pub fn new(legacy_json: bool) -> Self {
        Self { legacy_json }
    }
}

impl Default for PayloadTransform {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Transform for PayloadTransform {
    fn to_state(&self, segment: &str) -> Value {
        decode_payload(segment, self.legacy_json)
    }

    fn to_path(&self, value: &Value) -> String {
        encode_payload(value)
    }
}

/// `{a: "1", b: "2"}` → `a=1;b=2`
///
/// Keys and values are percent-encoded, so `;`, `=` and `/` survive the
/// trip through a path segment. Null values are left out.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use state_router::intents::encode_params;
///
/// let params = json!({"id": "abc", "type": "book"});
/// assert_eq!(encode_params(params.as_object().unwrap()), "id=abc;type=book");
///
/// let params = json!({"q": "a;b/c", "skip": null});
/// assert_eq!(encode_params(params.as_object().unwrap()), "q=a%3Bb%2Fc");
/// ```
pub fn encode_params(params: &Map<String, Value>) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value_to_segment(value))
            )
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// `a=1;b=2` → `{a: "1", b: "2"}`
///
/// Empty pairs are skipped; a pair without `=` maps to an empty string.
/// Keys and values are percent-decoded.
pub fn decode_params(segment: &str) -> Map<String, Value> {
    segment
        .split(';')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            (!key.is_empty()).then(|| (key, Value::String(decode_component(value))))
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    match urlencoding::decode(component) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => component.to_string(),
    }
}

/// JSON text of the payload, base64url without padding
pub fn encode_payload(payload: &Value) -> String {
    if payload.is_null() {
        return String::new();
    }
    URL_SAFE_NO_PAD.encode(payload.to_string())
}

/// Decodes a payload segment, degrading to `{}` on failure
///
/// Accepts url-safe or standard base64, padded or not. With `legacy_json`
/// set, a segment that is not base64 is parsed as bare (possibly
/// percent-encoded) JSON.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use state_router::intents::{decode_payload, encode_payload};
///
/// let payload = json!({"template": "book", "title": "Dune"});
/// assert_eq!(decode_payload(&encode_payload(&payload), true), payload);
///
/// assert_eq!(decode_payload("%7B%22a%22%3A1%7D", true), json!({"a": 1}));
/// assert_eq!(decode_payload("not json", true), json!({}));
/// ```
pub fn decode_payload(segment: &str, legacy_json: bool) -> Value {
    if segment.is_empty() {
        return Value::Object(Map::new());
    }

    if let Some(value) = decode_base64_json(segment) {
        return value;
    }

    if legacy_json {
        if let Ok(value) = serde_json::from_str::<Value>(&decode_component(segment)) {
            return value;
        }
    }

    tracing::warn!(segment, "Failed to parse JSON parameters");
    Value::Object(Map::new())
}

fn decode_base64_json(segment: &str) -> Option<Value> {
    let bytes = [URL_SAFE_NO_PAD, URL_SAFE, STANDARD_NO_PAD, STANDARD]
        .iter()
        .find_map(|engine| engine.decode(segment).ok())?;
    serde_json::from_slice(&bytes).ok()
}

/// Builds the intent sub-tree rooted at `<base>/:intent`
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use state_router::intents;
///
/// let router = intents("/intent").unwrap();
/// let state = router.decode("/intent/edit/id=abc;type=book").unwrap();
/// assert_eq!(
///     serde_json::Value::Object(state),
///     json!({"intent": "edit", "params": {"id": "abc", "type": "book"}})
/// );
/// ```
pub fn intents(base_path: &str) -> Result<Router, RouteError> {
    intents_with_config(base_path, RouterConfig::default())
}

/// `intents` with an explicit configuration for every node of the sub-tree
pub fn intents_with_config(base_path: &str, config: RouterConfig) -> Result<Router, RouteError> {
    let base = split_path(base_path).join("/");
    let legacy_json = config.intents.legacy_json_payload;

    let payload = route(":payload")
        .with_transform("payload", PayloadTransform::new(legacy_json))
        .with_config(config.clone())
        .build()?;

    let params = route(":params")
        .with_transform("params", ParamsTransform)
        .with_child(payload)
        .with_config(config.clone())
        .build()?;

    route(format!("{base}/:intent"))
        .with_child(params)
        .with_config(config)
        .build()
}
