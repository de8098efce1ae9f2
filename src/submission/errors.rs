//! Pulling a human-readable message out of a Sirius error response

use serde_json::Value;

/// Keys holding a single message, most specific first
const MESSAGE_KEYS: [&str; 2] = ["detail", "message"];

/// Keys Sirius uses for `{field: {code: message}}` validation maps
const VALIDATION_KEYS: [&str; 2] = ["validation_errors", "errorMessages"];

/// Message for a rejected request whose body said nothing useful
pub fn fallback_message(status: u16) -> String {
    format!("the request could not be completed (HTTP {status})")
}

/// Find the error message in a 4xx/5xx body.
///
/// Tried in order: `errors` as a string, `errors` as a list of strings,
/// `detail`, `message`, then the structured validation maps. Blank messages are
/// skipped. Multiple messages are joined with newlines.
pub fn extract_message(body: Option<&Value>) -> Option<String> {
    let body = body?;

    match body.get("errors") {
        Some(Value::String(message)) if !message.trim().is_empty() => {
            return Some(message.clone());
        }
        Some(Value::Array(items)) => {
            if let Some(joined) = join(items.iter().filter_map(Value::as_str)) {
                return Some(joined);
            }
        }
        _ => {}
    }

    for key in MESSAGE_KEYS {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return Some(message.to_string());
            }
        }
    }

    let maps = VALIDATION_KEYS
        .iter()
        .filter_map(|key| body.get(*key))
        .chain(body.get("data").and_then(|d| d.get("errorMessages")));
    for map in maps {
        if let Some(joined) = join(validation_messages(map)) {
            return Some(joined);
        }
    }

    None
}

fn validation_messages(map: &Value) -> impl Iterator<Item = &str> {
    map.as_object()
        .into_iter()
        .flat_map(|fields| fields.values())
        .filter_map(Value::as_object)
        .flat_map(|codes| codes.values())
        .filter_map(Value::as_str)
}

fn join<'a>(messages: impl Iterator<Item = &'a str>) -> Option<String> {
    let messages: Vec<&str> = messages.filter(|m| !m.trim().is_empty()).collect();
    if messages.is_empty() {
        None
    } else {
        Some(messages.join("\n"))
    }
}
