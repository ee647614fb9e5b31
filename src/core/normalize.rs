use crate::domain::model::FieldValue;
use serde_json::Value;

/// Sort one raw field value into the closed variant set. Only the first
/// element of an array is inspected; a list starting with an object counts
/// as a list of objects even if the tail is mixed.
pub fn classify(value: Value) -> FieldValue {
    match value {
        Value::Array(items) => match items.first() {
            Some(Value::Object(_)) => FieldValue::ObjectList(items),
            _ => FieldValue::ScalarList(items),
        },
        Value::Object(map) => FieldValue::Object(map),
        scalar => FieldValue::Scalar(scalar),
    }
}

/// Reduce a classified value to something the index accepts: scalars and
/// scalar lists pass through, nested structures become compact JSON text
/// so they stay searchable instead of tripping the index schema.
pub fn normalize(value: FieldValue) -> Value {
    match value {
        FieldValue::Scalar(scalar) => scalar,
        FieldValue::ScalarList(items) => Value::Array(items),
        FieldValue::ObjectList(items) => {
            Value::Array(items.iter().map(|item| Value::String(encode_compact(item))).collect())
        }
        FieldValue::Object(map) => Value::String(encode_compact(&Value::Object(map))),
    }
}

pub fn normalize_value(value: Value) -> Value {
    normalize(classify(value))
}

// Encoding a Value cannot fail outside of serde_json itself breaking.
fn encode_compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
