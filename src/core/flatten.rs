use crate::core::normalize::normalize_value;
use crate::domain::model::{FlatDocument, RedactionSet, RejectionReason};
use serde_json::Value;

pub const ID_KEY: &str = "document_id";
pub const FIELD_LIST_KEY: &str = "fieldTypes";
const FIELD_NAME_KEY: &str = "fieldName";
const FIELD_VALUE_KEY: &str = "value";

/// Flatten one raw record into an index-ready document, or say why it
/// cannot be. Rejections are structural only; odd value shapes are handled
/// by normalization, never raised.
pub fn flatten(record: &Value, redaction: &RedactionSet) -> Result<FlatDocument, RejectionReason> {
    let id = match record.get(ID_KEY) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(RejectionReason::MissingId),
    };

    let descriptors = record
        .get(FIELD_LIST_KEY)
        .and_then(Value::as_array)
        .ok_or(RejectionReason::MalformedFields)?;

    let mut doc = FlatDocument::new(id);

    for descriptor in descriptors {
        let name = descriptor
            .get(FIELD_NAME_KEY)
            .and_then(Value::as_str)
            .ok_or(RejectionReason::MalformedFields)?;
        if name.is_empty() {
            return Err(RejectionReason::MalformedFields);
        }
        let value = descriptor
            .get(FIELD_VALUE_KEY)
            .ok_or(RejectionReason::MalformedFields)?;

        if redaction.contains(name) {
            continue;
        }

        doc.insert(name.to_string(), normalize_value(value.clone()));
    }

    Ok(doc)
}
