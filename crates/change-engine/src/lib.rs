//! Change Engine - applies approved contract edits to the document collection
//!
//! This crate provides:
//! - The mutation engine for the MODIFY_METADATA / MODIFY_CLAUSE / ADD_CLAUSE /
//!   DELETE_CLAUSE taxonomy
//! - Recovery of JSON payloads from free-form model output
//! - The document store abstraction and its JSON file implementation

pub mod ops;
pub mod recovery;
pub mod store;

use shared_types::{ChangeOperation, DocumentCollection, SuggestedChange};

pub use ops::{ChangeOutcome, SkipReason};
pub use recovery::{is_raw_fallback, recover_json};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};

/// A change that was skipped with a warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeWarning {
    /// Position of the change in the submitted batch
    pub index: usize,
    pub doc_id: String,
    pub reason: SkipReason,
}

impl std::fmt::Display for ChangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "change #{} on {}: {}", self.index, self.doc_id, self.reason)
    }
}

/// Summary of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    pub warnings: Vec<ChangeWarning>,
}

/// ChangeEngine entry point
#[derive(Debug, Clone, Copy)]
pub struct ChangeEngine;

impl ChangeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply `changes` in order against `collection`.
    ///
    /// A change that cannot be applied is skipped and the batch continues.
    /// Nothing is persisted here.
    pub fn apply(
        &self,
        collection: &mut DocumentCollection,
        changes: &[SuggestedChange],
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (index, change) in changes.iter().enumerate() {
            match self.apply_one(collection, change) {
                ChangeOutcome::Applied => {
                    report.applied += 1;
                    tracing::debug!(
                        doc_id = %change.doc_id,
                        operation = %change.operation_type(),
                        "Applied change"
                    );
                }
                ChangeOutcome::Skipped(reason) if reason.is_silent() => {
                    tracing::debug!(
                        doc_id = %change.doc_id,
                        operation = %change.operation_type(),
                        "Ignored change: {}",
                        reason
                    );
                }
                ChangeOutcome::Skipped(reason) => {
                    tracing::warn!(
                        doc_id = %change.doc_id,
                        operation = %change.operation_type(),
                        "Skipping change: {}",
                        reason
                    );
                    report.warnings.push(ChangeWarning {
                        index,
                        doc_id: change.doc_id.clone(),
                        reason,
                    });
                }
            }
        }

        report
    }

    /// Apply a single change
    pub fn apply_one(
        &self,
        collection: &mut DocumentCollection,
        change: &SuggestedChange,
    ) -> ChangeOutcome {
        let Some(doc) = collection.get_mut(&change.doc_id) else {
            return ChangeOutcome::Skipped(SkipReason::UnknownDocument(change.doc_id.clone()));
        };

        match &change.operation {
            ChangeOperation::ModifyMetadata {
                target_field,
                new_value,
            } => ops::modify_metadata(doc, target_field, new_value),
            ChangeOperation::ModifyClause {
                target_clause_id,
                new_value,
            } => ops::modify_clause(doc, target_clause_id, new_value),
            ChangeOperation::AddClause { new_value } => ops::add_clause(doc, new_value),
            ChangeOperation::DeleteClause { target_clause_id } => {
                ops::delete_clause(doc, target_clause_id)
            }
        }
    }
}

impl Default for ChangeEngine {
    fn default() -> Self {
        Self::new()
    }
}
