//! Suggested document edits produced by transcript analysis

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation kinds understood by the change engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    ModifyMetadata,
    ModifyClause,
    AddClause,
    DeleteClause,
}

impl OperationType {
    pub const ALL: [OperationType; 4] = [
        OperationType::ModifyMetadata,
        OperationType::ModifyClause,
        OperationType::AddClause,
        OperationType::DeleteClause,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::ModifyMetadata => "MODIFY_METADATA",
            OperationType::ModifyClause => "MODIFY_CLAUSE",
            OperationType::AddClause => "ADD_CLAUSE",
            OperationType::DeleteClause => "DELETE_CLAUSE",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation-specific part of a [`SuggestedChange`].
///
/// On the wire this is flattened into the change record and keyed by
/// `operation_type`; fields belonging to other operations are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeOperation {
    /// Replace the value of an existing top-level document field
    ModifyMetadata {
        target_field: String,
        #[serde(default)]
        new_value: Value,
    },
    /// Rewrite a clause: an object updates `title`/`text`, a string updates `text`
    ModifyClause {
        target_clause_id: String,
        #[serde(default)]
        new_value: Value,
    },
    /// Append a clause object verbatim
    AddClause {
        #[serde(default)]
        new_value: Value,
    },
    /// Remove every clause carrying this id
    DeleteClause { target_clause_id: String },
}

impl ChangeOperation {
    pub fn operation_type(&self) -> OperationType {
        match self {
            ChangeOperation::ModifyMetadata { .. } => OperationType::ModifyMetadata,
            ChangeOperation::ModifyClause { .. } => OperationType::ModifyClause,
            ChangeOperation::AddClause { .. } => OperationType::AddClause,
            ChangeOperation::DeleteClause { .. } => OperationType::DeleteClause,
        }
    }
}

/// A single proposed edit to one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedChange {
    /// Key of the target document in the collection
    pub doc_id: String,

    /// Transcript excerpt justifying the change (audit only)
    #[serde(default)]
    pub reasoning: String,

    /// Value the LLM believed was current; never compared against the store
    #[serde(default)]
    pub old_value: Option<Value>,

    #[serde(flatten)]
    pub operation: ChangeOperation,
}

impl SuggestedChange {
    pub fn new(doc_id: impl Into<String>, operation: ChangeOperation) -> Self {
        Self {
            doc_id: doc_id.into(),
            reasoning: String::new(),
            old_value: None,
            operation,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation.operation_type()
    }
}

/// Structured output requested from the LLM when analysing a transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub suggestions: Vec<SuggestedChange>,
}
