//! # Intent Parsing
//!
//! Extracts a structured [`Intent`] from raw model output. The model is chatty: the
//! JSON object we want is usually wrapped in prose or a code fence, so the parser
//! scans for the first balanced `{...}` span that deserializes as a JSON object.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::error::ParseError;
use crate::domain::types::{Action, Intent};

const ACTION_KEY: &str = "action";
const NESTED_PARAMETERS_KEY: &str = "parameters";

pub fn parse_intent(raw: &str) -> Result<Intent, ParseError> {
    let mut last_error: Option<String> = None;

    for (start, end) in brace_spans(raw) {
        match serde_json::from_str::<Map<String, Value>>(&raw[start..=end]) {
            Ok(object) => return intent_from_object(object),
            Err(e) => {
                tracing::debug!("Skipping unparsable payload candidate: {}", e);
                last_error = Some(e.to_string());
            }
        }
    }

    match last_error {
        Some(e) => Err(ParseError::Malformed(e)),
        None => Err(ParseError::NoPayload),
    }
}

/// Balanced brace spans as inclusive byte ranges, ordered by opening brace.
///
/// One pass pairs every closing brace with the nearest open one. Unclosed braces
/// pair with nothing. String literals are only tracked inside an open brace, so
/// stray quotes in surrounding prose cannot hide a payload.
fn brace_spans(raw: &str) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut spans = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in raw.as_bytes().iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if !open.is_empty() => in_string = true,
            b'{' => open.push(i),
            b'}' => {
                if let Some(start) = open.pop() {
                    spans.push((start, i));
                }
            }
            _ => {}
        }
    }

    spans.sort_unstable_by_key(|&(start, _)| start);
    spans
}

fn intent_from_object(mut object: Map<String, Value>) -> Result<Intent, ParseError> {
    let action = match object.remove(ACTION_KEY) {
        Some(Value::String(name)) if !name.trim().is_empty() => Action::from_name(&name),
        _ => return Err(ParseError::MissingAction),
    };

    let nested = object.remove(NESTED_PARAMETERS_KEY);

    let mut parameters = BTreeMap::new();
    for (key, value) in object {
        if let Some(text) = scalar_to_string(&value) {
            parameters.insert(key, text);
        }
    }
    // Nested entries win over flat ones.
    if let Some(Value::Object(inner)) = nested {
        for (key, value) in inner {
            if let Some(text) = scalar_to_string(&value) {
                parameters.insert(key, text);
            }
        }
    }

    Ok(Intent::new(action, parameters))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
