//! Request body encoding

use crate::state::{Encoding, FieldKind, FormSnapshot};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("could not url-encode form: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),

    #[error("could not encode form as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode every field that is sent, empty ones included unless the field
/// is marked optional. Form bodies keep the declared order.
pub fn encode(snapshot: &FormSnapshot, encoding: Encoding) -> Result<String, EncodeError> {
    if snapshot.is_empty() {
        return Ok(String::new());
    }

    match encoding {
        Encoding::Form => {
            let pairs: Vec<(&str, &str)> = snapshot.pairs().collect();
            Ok(serde_urlencoded::to_string(pairs)?)
        }
        Encoding::Json => {
            let object: Map<String, Value> = snapshot
                .fields()
                .iter()
                .filter(|f| f.is_sent())
                .map(|f| (f.name().to_string(), json_value(f.spec.kind, f.value())))
                .collect();
            Ok(serde_json::to_string(&object)?)
        }
    }
}

fn json_value(kind: FieldKind, value: &str) -> Value {
    match kind {
        FieldKind::Text => Value::from(value),
        FieldKind::Number => value
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Value::from(value), Value::from),
        FieldKind::Flag => Value::Bool(value == "true"),
        FieldKind::List => value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Value::from)
            .collect(),
    }
}
