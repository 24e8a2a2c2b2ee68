//! Best-effort JSON extraction from free-form LLM output
//!
//! Models asked for "JSON only" still wrap their answer in prose or Markdown
//! fences. [`recover_json`] tries progressively looser strategies and, when
//! nothing parses, hands back the raw text wrapped in a sentinel shape instead
//! of failing.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

/// Key used by the fallback sentinel `[{"raw_output": text}]`
pub const RAW_OUTPUT_KEY: &str = "raw_output";

lazy_static! {
    /// Fenced block tagged as json, first one wins
    static ref FENCED_JSON_PATTERN: Regex = Regex::new(r"(?s)```json(.*?)```").unwrap();

    /// Outermost-looking array or object, greedy to the last closing bracket
    static ref EMBEDDED_JSON_PATTERN: Regex = Regex::new(r"(?s)(\[.*\]|\{.*\})").unwrap();
}

/// Parse `text` as JSON, falling back to fenced and embedded fragments.
///
/// Never fails; see [`is_raw_fallback`] to tell a recovered value from the
/// fallback sentinel.
pub fn recover_json(text: &str) -> Value {
    if let Ok(value) = serde_json::from_str(text) {
        return value;
    }

    if let Some(value) = from_fenced_block(text) {
        return value;
    }

    if let Some(value) = from_embedded_fragment(text) {
        return value;
    }

    tracing::debug!(len = text.len(), "No JSON found in model output, using raw fallback");
    raw_fallback(text)
}

fn from_fenced_block(text: &str) -> Option<Value> {
    let inner = FENCED_JSON_PATTERN.captures(text)?.get(1)?;
    serde_json::from_str(inner.as_str().trim()).ok()
}

fn from_embedded_fragment(text: &str) -> Option<Value> {
    let fragment = EMBEDDED_JSON_PATTERN.captures(text)?.get(1)?;
    serde_json::from_str(fragment.as_str()).ok()
}

/// The sentinel returned when no JSON could be recovered
pub fn raw_fallback(text: &str) -> Value {
    json!([{ RAW_OUTPUT_KEY: text }])
}

/// True for exactly the `[{"raw_output": <string>}]` sentinel shape
pub fn is_raw_fallback(value: &Value) -> bool {
    match value.as_array().map(Vec::as_slice) {
        Some([only]) => only.as_object().is_some_and(|obj| {
            obj.len() == 1 && obj.get(RAW_OUTPUT_KEY).is_some_and(Value::is_string)
        }),
        _ => false,
    }
}
