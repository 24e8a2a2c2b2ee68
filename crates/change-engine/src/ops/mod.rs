//! Per-operation mutation rules
//!
//! Each rule edits a single document in place and reports whether the change
//! took effect. Rules never fail: anything that cannot be applied comes back
//! as a [`SkipReason`].

pub mod clause;
pub mod metadata;

pub use clause::{add_clause, delete_clause, modify_clause};
pub use metadata::modify_metadata;

use thiserror::Error;

/// Result of applying one change to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied,
    Skipped(SkipReason),
}

impl ChangeOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ChangeOutcome::Applied)
    }
}

/// Why a change was not applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("doc_id {0} not found")]
    UnknownDocument(String),

    #[error("field {0} does not exist on the document")]
    UnknownField(String),

    #[error("clause_id {0} not found")]
    ClauseNotFound(String),

    #[error("clause {0} received a new_value that is neither an object nor a string")]
    InvalidClauseValue(String),

    #[error("document has no clauses")]
    NoClauses,

    #[error("clauses field is not a sequence")]
    ClausesNotASequence,
}

impl SkipReason {
    /// Silent skips are not reported as warnings.
    ///
    /// MODIFY_METADATA on an unknown field and DELETE_CLAUSE on a document
    /// without clauses are dropped quietly; every other skip is warned.
    pub fn is_silent(&self) -> bool {
        matches!(self, SkipReason::UnknownField(_) | SkipReason::NoClauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_reasons() {
        assert!(SkipReason::UnknownField("x".into()).is_silent());
        assert!(SkipReason::NoClauses.is_silent());
        assert!(!SkipReason::UnknownDocument("D9".into()).is_silent());
        assert!(!SkipReason::ClauseNotFound("C9".into()).is_silent());
        assert!(!SkipReason::InvalidClauseValue("C1".into()).is_silent());
        assert!(!SkipReason::ClausesNotASequence.is_silent());
    }

    #[test]
    fn test_reason_messages_name_the_target() {
        assert_eq!(
            SkipReason::ClauseNotFound("C7".into()).to_string(),
            "clause_id C7 not found"
        );
        assert_eq!(
            SkipReason::UnknownDocument("D9".into()).to_string(),
            "doc_id D9 not found"
        );
    }
}
