//! Property-based tests for the change engine
//!
//! Covers JSON recovery laws and the per-operation counting rules.

use change_engine::{is_raw_fallback, recover_json, ChangeEngine};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use shared_types::{ChangeOperation, DocumentCollection, SuggestedChange};

// ============================================================
// Strategies
// ============================================================

/// Arbitrary JSON values (integers only, floats are not needed here)
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[^`]{0,20}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Container values, the only thing a fenced block can usefully hold
fn json_container() -> impl Strategy<Value = Value> {
    json_value().prop_map(|v| match v {
        Value::Array(_) | Value::Object(_) => v,
        other => json!([other]),
    })
}

/// Prose that can never parse as JSON on its own
fn prose() -> impl Strategy<Value = String> {
    "[a-zA-Z ,.!?']{0,80}".prop_map(|s| format!("Note: {}", s))
}

fn clause_id() -> impl Strategy<Value = String> {
    "C[0-9]{1,3}"
}

/// A document with `n` uniquely identified clauses
fn collection_with_clauses(n: usize) -> DocumentCollection {
    let clauses: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "clause_id": format!("C{}", i),
                "title": format!("Title {}", i),
                "text": "body"
            })
        })
        .collect();
    serde_json::from_value(json!({
        "D1": {"doc_name": "Agreement", "clauses": clauses}
    }))
    .unwrap()
}

fn change(operation: ChangeOperation) -> SuggestedChange {
    SuggestedChange::new("D1", operation)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Response recovery
    // ============================================================

    #[test]
    fn valid_json_is_returned_exactly(value in json_value()) {
        let text = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(recover_json(&text), value);
    }

    #[test]
    fn pretty_json_is_returned_exactly(value in json_value()) {
        let text = serde_json::to_string_pretty(&value).unwrap();
        prop_assert_eq!(recover_json(&text), value);
    }

    #[test]
    fn fenced_json_is_unwrapped(
        value in json_container(),
        before in prose(),
        after in "[a-zA-Z .]{0,40}",
    ) {
        let body = serde_json::to_string_pretty(&value).unwrap();
        let text = format!("{}\n```json\n{}\n```\n{}", before, body, after);
        prop_assert_eq!(recover_json(&text), value);
    }

    #[test]
    fn prose_falls_back_to_raw_output(text in prose()) {
        let value = recover_json(&text);
        prop_assert!(is_raw_fallback(&value));
        prop_assert_eq!(value, json!([{"raw_output": text}]));
    }

    // ============================================================
    // Mutation engine
    // ============================================================

    #[test]
    fn unknown_metadata_field_changes_nothing(
        field in "[a-z]{3,12}_unknown",
        value in json_value(),
    ) {
        let mut docs = collection_with_clauses(2);
        let before = docs.clone();
        let report = ChangeEngine::new().apply(
            &mut docs,
            &[change(ChangeOperation::ModifyMetadata { target_field: field, new_value: value })],
        );
        prop_assert_eq!(report.applied, 0);
        prop_assert_eq!(docs, before);
    }

    #[test]
    fn add_clause_twice_grows_by_two(n in 0usize..5, id in clause_id(), text in ".{0,30}") {
        let mut docs = collection_with_clauses(n);
        let clause = json!({"clause_id": id, "title": "New", "text": text});
        let add = change(ChangeOperation::AddClause { new_value: clause.clone() });

        let report = ChangeEngine::new().apply(&mut docs, &[add.clone(), add]);

        prop_assert_eq!(report.applied, 2);
        let clauses = docs["D1"].clauses().unwrap();
        prop_assert_eq!(clauses.len(), n + 2);
        prop_assert_eq!(&clauses[n], &clause);
        prop_assert_eq!(&clauses[n + 1], &clause);
    }

    #[test]
    fn delete_existing_clause_shrinks_by_one(n in 1usize..8, pick in any::<prop::sample::Index>()) {
        let mut docs = collection_with_clauses(n);
        let target = format!("C{}", pick.index(n));

        let report = ChangeEngine::new().apply(
            &mut docs,
            &[change(ChangeOperation::DeleteClause { target_clause_id: target.clone() })],
        );

        prop_assert_eq!(report.applied, 1);
        prop_assert_eq!(docs["D1"].clause_count(), n - 1);
        prop_assert!(docs["D1"].find_clause(&target).is_none());
    }

    #[test]
    fn delete_missing_clause_keeps_length(n in 0usize..8, suffix in "[A-Z]{2,4}") {
        let mut docs = collection_with_clauses(n);
        let report = ChangeEngine::new().apply(
            &mut docs,
            &[change(ChangeOperation::DeleteClause { target_clause_id: format!("X-{}", suffix) })],
        );

        prop_assert_eq!(report.applied, 0);
        prop_assert_eq!(docs["D1"].clause_count(), n);
    }

    #[test]
    fn string_modify_touches_only_text(
        n in 1usize..6,
        pick in any::<prop::sample::Index>(),
        text in ".{0,40}",
    ) {
        let mut docs = collection_with_clauses(n);
        let i = pick.index(n);
        let target = format!("C{}", i);

        let report = ChangeEngine::new().apply(
            &mut docs,
            &[change(ChangeOperation::ModifyClause {
                target_clause_id: target.clone(),
                new_value: Value::String(text.clone()),
            })],
        );

        prop_assert_eq!(report.applied, 1);
        let clause = docs["D1"].find_clause(&target).unwrap();
        let expected = json!({"clause_id": target, "title": format!("Title {}", i), "text": text});
        prop_assert_eq!(clause, &expected);
    }

    #[test]
    fn unknown_document_is_always_skipped(doc_id in "[A-Z]{3}-[0-9]{2}", id in clause_id()) {
        let mut docs = collection_with_clauses(3);
        let before = docs.clone();
        let report = ChangeEngine::new().apply(
            &mut docs,
            &[SuggestedChange::new(doc_id, ChangeOperation::DeleteClause { target_clause_id: id })],
        );

        prop_assert_eq!(report.applied, 0);
        prop_assert_eq!(report.warnings.len(), 1);
        prop_assert_eq!(docs, before);
    }
}
