// MODIFY_METADATA: overwrite an existing top-level field
use serde_json::Value;
use shared_types::Document;

use super::{ChangeOutcome, SkipReason};

/// Sets `target_field` to `new_value`, but only if the field already exists.
///
/// Unknown fields are skipped without a warning; new metadata keys are never
/// introduced through this operation. The reserved `clauses` field is not
/// protected: overwriting it with a non-sequence makes later clause operations
/// on the document skip with `ClausesNotASequence`.
pub fn modify_metadata(doc: &mut Document, target_field: &str, new_value: &Value) -> ChangeOutcome {
    if !doc.contains_field(target_field) {
        return ChangeOutcome::Skipped(SkipReason::UnknownField(target_field.to_string()));
    }

    doc.set(target_field, new_value.clone());
    ChangeOutcome::Applied
}
