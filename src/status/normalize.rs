use super::types::CanonicalStatus;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Keys searched, in order, inside a structured `censorship` value.
pub const CENSORSHIP_LABEL_KEYS: [&str; 4] = ["mode", "state", "name", "type"];

#[derive(Debug, Default, Deserialize)]
struct RawStatus {
    #[serde(rename = "isCensored", default)]
    is_censored: Value,
    #[serde(rename = "isStreamRunning", default)]
    is_stream_running: Value,
    #[serde(default)]
    state: Value,
}

#[derive(Debug, Default, Deserialize)]
struct RawState {
    #[serde(default)]
    stream: Option<ShapeOf>,
    #[serde(default)]
    censorship: Option<ShapeOf>,
}

/// The shapes a nested state field shows up in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShapeOf {
    Label(String),
    Structured(Map<String, Value>),
    Other(Value),
}

/// Turn an upstream payload of any shape into a `CanonicalStatus`. Missing or
/// mistyped parts fall back to defaults; this never fails.
pub fn normalize(payload: Value) -> CanonicalStatus {
    let raw: RawStatus = from_mapping(payload);
    let state: RawState = from_mapping(raw.state);

    CanonicalStatus {
        censored: is_truthy(&raw.is_censored),
        stream_running: is_truthy(&raw.is_stream_running),
        stream_state_label: state.stream.and_then(stream_label),
        censorship_state_label: state.censorship.and_then(censorship_label),
        fetch_error: None,
    }
}

/// Derived struct visitors also accept sequences, binding elements to fields
/// by position. Only a JSON object counts as a mapping here.
fn from_mapping<T: DeserializeOwned + Default>(value: Value) -> T {
    if value.is_object() {
        serde_json::from_value(value).unwrap_or_default()
    } else {
        T::default()
    }
}

fn stream_label(shape: ShapeOf) -> Option<String> {
    match shape {
        ShapeOf::Label(label) => Some(label),
        ShapeOf::Structured(fields) => fields.get("running").and_then(scalar_label),
        ShapeOf::Other(_) => None,
    }
}

fn censorship_label(shape: ShapeOf) -> Option<String> {
    match shape {
        ShapeOf::Label(label) => Some(label),
        ShapeOf::Structured(fields) => CENSORSHIP_LABEL_KEYS
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::to_owned),
        ShapeOf::Other(_) => None,
    }
}

fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loose boolean reading: empty and zero-like values are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
