// Clause-level operations: MODIFY_CLAUSE, ADD_CLAUSE, DELETE_CLAUSE
use serde_json::Value;
use shared_types::{clause_id_of, Document};

use super::{ChangeOutcome, SkipReason};

/// Rewrites the first clause whose `clause_id` matches.
///
/// An object `new_value` replaces `title` and `text`, keeping the current value
/// for any key it lacks. A string `new_value` replaces `text` only.
pub fn modify_clause(
    doc: &mut Document,
    target_clause_id: &str,
    new_value: &Value,
) -> ChangeOutcome {
    let not_found =
        || ChangeOutcome::Skipped(SkipReason::ClauseNotFound(target_clause_id.to_string()));

    let Some(clauses) = doc.clauses_mut() else {
        return not_found();
    };
    let Some(clause) = clauses
        .iter_mut()
        .find(|clause| clause_id_of(clause) == Some(target_clause_id))
        .and_then(Value::as_object_mut)
    else {
        return not_found();
    };

    match new_value {
        Value::Object(update) => {
            for key in ["title", "text"] {
                if let Some(value) = update.get(key) {
                    clause.insert(key.to_string(), value.clone());
                }
            }
            ChangeOutcome::Applied
        }
        Value::String(text) => {
            clause.insert("text".to_string(), Value::String(text.clone()));
            ChangeOutcome::Applied
        }
        _ => ChangeOutcome::Skipped(SkipReason::InvalidClauseValue(target_clause_id.to_string())),
    }
}

/// Appends `new_value` as-is, creating the clause sequence if needed.
///
/// The value is not checked against the clause shape and duplicates are kept.
pub fn add_clause(doc: &mut Document, new_value: &Value) -> ChangeOutcome {
    match doc.clauses_or_insert() {
        Some(clauses) => {
            clauses.push(new_value.clone());
            ChangeOutcome::Applied
        }
        None => ChangeOutcome::Skipped(SkipReason::ClausesNotASequence),
    }
}

/// Drops every clause whose `clause_id` matches.
///
/// Counts as applied only when at least one clause was removed.
pub fn delete_clause(doc: &mut Document, target_clause_id: &str) -> ChangeOutcome {
    if !doc.has_clauses() {
        return ChangeOutcome::Skipped(SkipReason::NoClauses);
    }
    let Some(clauses) = doc.clauses() else {
        return ChangeOutcome::Skipped(SkipReason::ClausesNotASequence);
    };

    let len_before = clauses.len();
    let kept: Vec<Value> = clauses
        .iter()
        .filter(|clause| clause_id_of(clause) != Some(target_clause_id))
        .cloned()
        .collect();
    let removed = kept.len() != len_before;

    doc.set_clauses(kept);

    if removed {
        ChangeOutcome::Applied
    } else {
        ChangeOutcome::Skipped(SkipReason::ClauseNotFound(target_clause_id.to_string()))
    }
}
