use crate::core::flatten::flatten;
use crate::domain::model::{BatchResult, RedactionSet, Rejection};
use crate::utils::error::Result;
use serde_json::Value;

const DATA_KEY: &str = "data";
const INDEX_KEY: &str = "Index";
const DOCUMENTS_KEY: &str = "Documents";

/// Parse raw input bytes and transform them. Invalid JSON fails fast
/// before any record is touched.
pub fn transform_slice(bytes: &[u8], redaction: &RedactionSet) -> Result<BatchResult> {
    let raw: Value = serde_json::from_slice(bytes)?;
    Ok(transform(&raw, redaction))
}

/// Walk the nested `data` → `Index` → `Documents` containers and flatten
/// every record found. A container absent at any level contributes
/// nothing; a record that cannot be flattened is reported with its
/// encounter index and never aborts the rest of the batch.
pub fn transform(raw: &Value, redaction: &RedactionSet) -> BatchResult {
    let mut result = BatchResult::default();
    let mut index = 0usize;

    for group in member_array(raw.get(DATA_KEY), INDEX_KEY) {
        for record in member_array(Some(group), DOCUMENTS_KEY) {
            match flatten(record, redaction) {
                Ok(doc) => result.accepted.push(doc),
                Err(reason) => result.rejected.push(Rejection { index, reason }),
            }
            index += 1;
        }
    }

    result
}

// Absent container = empty sequence.
fn member_array<'a>(value: Option<&'a Value>, key: &str) -> &'a [Value] {
    value
        .and_then(|v| v.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
