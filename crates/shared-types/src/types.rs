use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved document field holding the clause sequence
pub const CLAUSES_FIELD: &str = "clauses";

/// All documents in the store, keyed by doc_id, in file order
pub type DocumentCollection = IndexMap<String, Document>;

/// One contract record: free-form metadata fields plus an optional `clauses` list.
///
/// Clause entries (`clause_id`, `title`, `text`) are kept as raw JSON because
/// ADD_CLAUSE appends whatever the caller approved; the helpers below look
/// them up by key instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field, returning the previous value
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(field.into(), value)
    }

    /// Whether the reserved `clauses` field exists at all (whatever its type)
    pub fn has_clauses(&self) -> bool {
        self.fields.contains_key(CLAUSES_FIELD)
    }

    /// The clause sequence, if present and actually a sequence
    pub fn clauses(&self) -> Option<&Vec<Value>> {
        self.fields.get(CLAUSES_FIELD).and_then(Value::as_array)
    }

    pub fn clauses_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.fields
            .get_mut(CLAUSES_FIELD)
            .and_then(Value::as_array_mut)
    }

    /// The clause sequence, created empty when the field is missing.
    ///
    /// Returns `None` if `clauses` exists but holds something other than a sequence.
    pub fn clauses_or_insert(&mut self) -> Option<&mut Vec<Value>> {
        self.fields
            .entry(CLAUSES_FIELD)
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
    }

    pub fn set_clauses(&mut self, clauses: Vec<Value>) {
        self.fields
            .insert(CLAUSES_FIELD.to_string(), Value::Array(clauses));
    }

    pub fn clause_count(&self) -> usize {
        self.clauses().map_or(0, Vec::len)
    }

    /// Find a clause entry by its `clause_id`
    pub fn find_clause(&self, clause_id: &str) -> Option<&Value> {
        self.clauses()?
            .iter()
            .find(|clause| clause_id_of(clause) == Some(clause_id))
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}

/// `clause_id` of a raw clause entry, when it has a string one
pub fn clause_id_of(clause: &Value) -> Option<&str> {
    clause.get("clause_id").and_then(Value::as_str)
}
