use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Classification of one raw field value. Arrays are classified by their
/// first element only; an empty array counts as a scalar list.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    ScalarList(Vec<Value>),
    ObjectList(Vec<Value>),
    Object(Map<String, Value>),
}

/// One index-ready document: a single flat JSON object whose `id` key is
/// always present and serialized first. Field order follows first insertion;
/// re-inserting a name keeps its position and replaces the value.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDocument {
    fields: Map<String, Value>,
}

impl FlatDocument {
    pub fn new(id: String) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String(id));
        Self { fields }
    }

    pub fn insert(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    /// Number of keys including `id`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Serialize for FlatDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Field names excluded from every output document. Read-only for the
/// duration of a transformation run.
#[derive(Debug, Clone)]
pub struct RedactionSet {
    names: HashSet<String>,
}

impl RedactionSet {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            names: names.into_iter().collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for RedactionSet {
    fn default() -> Self {
        Self::new(["sensitive_data".to_string()])
    }
}

/// Why a single record was dropped from the batch. Structural problems
/// only; value-level oddities are absorbed by normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    MissingId,
    MalformedFields,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingId => write!(f, "missing document_id"),
            RejectionReason::MalformedFields => write!(f, "malformed field list"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectionReason,
}

/// Outcome of one batch transformation, both vectors in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    pub accepted: Vec<FlatDocument>,
    pub rejected: Vec<Rejection>,
}

/// Result of one submission attempt against the index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexOutcome {
    pub submitted_count: usize,
    pub success: bool,
    pub server_message: Option<String>,
}

/// Read-side snapshot of a core: size, document count and a few sample
/// documents with system fields stripped. Also the persisted metadata
/// file format.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct CoreDescriptor {
    pub core_name: String,
    pub index_size_bytes: u64,
    pub num_documents: u64,
    pub sample_documents: Vec<Map<String, Value>>,
}

/// HTTP basic credentials, passed through to the index untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
