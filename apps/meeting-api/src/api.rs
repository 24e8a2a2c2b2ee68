//! API handlers for the meeting API server
//!
//! Provides REST endpoints for:
//! - Legal/compliance chatbot
//! - Transcript analysis (key legal items, action items)
//! - Suggesting and applying contract edits
//! - Reading and querying the document database

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{AnalysisResponse, DocumentCollection, SuggestedChange};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::prompts;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /
pub async fn handle_root() -> Json<Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "meeting-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Trimmed value of a required text field, or BadInput when blank
fn required<'a>(value: &'a str, name: &str) -> Result<&'a str, ServerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServerError::BadInput(format!("{} cannot be empty", name)));
    }
    Ok(trimmed)
}

// ============================================================================
// Chatbot
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub is_legal_related: bool,
}

/// Handler: POST /api/chatbot
///
/// Classifies the message first and only answers legal/compliance questions.
pub async fn handle_chatbot(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload?;
    let message = required(&req.message, "Message")?;

    let classification = state
        .llm
        .generate(&prompts::classification_prompt(message))
        .await?;
    let is_legal_related = prompts::is_affirmative(&classification);
    info!(is_legal_related, "Chatbot query classified");

    if !is_legal_related {
        return Ok(Json(ChatResponse {
            response: prompts::OFF_TOPIC_REPLY.to_string(),
            is_legal_related: false,
        }));
    }

    let response = state
        .llm
        .generate(&prompts::legal_answer_prompt(message))
        .await?;

    Ok(Json(ChatResponse {
        response,
        is_legal_related: true,
    }))
}

// ============================================================================
// Transcript analysis
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    #[serde(default)]
    pub transcript: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Recovered JSON, or the `[{"raw_output": ...}]` fallback
    pub table: Value,
    pub raw: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionsResponse {
    pub actions: Value,
    pub raw: String,
}

/// Handler: POST /api/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, ServerError> {
    let Json(req) = payload?;
    let transcript = required(&req.transcript, "Transcript")?;
    debug!(chars = transcript.len(), "Extracting key legal items");

    let raw = state
        .llm
        .generate(&prompts::extract_table_prompt(transcript))
        .await?;
    let table = change_engine::recover_json(&raw);
    if change_engine::is_raw_fallback(&table) {
        info!("Extraction output was not JSON, returning raw text");
    }

    Ok(Json(ExtractResponse { table, raw }))
}

/// Handler: POST /api/actions
pub async fn handle_actions(
    State(state): State<AppState>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Json<ActionsResponse>, ServerError> {
    let Json(req) = payload?;
    let transcript = required(&req.transcript, "Transcript")?;
    debug!(chars = transcript.len(), "Extracting action items");

    let raw = state
        .llm
        .generate(&prompts::action_items_prompt(transcript))
        .await?;
    let actions = change_engine::recover_json(&raw);
    if change_engine::is_raw_fallback(&actions) {
        info!("Action item output was not JSON, returning raw text");
    }

    Ok(Json(ActionsResponse { actions, raw }))
}

// ============================================================================
// Suggest / apply changes
// ============================================================================

/// Handler: POST /api/suggest-changes
///
/// Sends the full database and the transcript to the model, constrained to the
/// `AnalysisResponse` schema, and validates what comes back.
pub async fn handle_suggest_changes(
    State(state): State<AppState>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ServerError> {
    let Json(req) = payload?;
    let transcript = required(&req.transcript, "Transcript")?;

    let collection = state.store.load()?;
    let database_json = to_prompt_json(&collection)?;
    let prompt = prompts::suggest_changes_prompt(&database_json, transcript);
    debug!(
        documents = collection.len(),
        prompt_chars = prompt.len(),
        "Requesting change suggestions"
    );

    let raw = state
        .llm
        .generate_structured(&prompt, &prompts::analysis_response_schema())
        .await?;
    let analysis = parse_analysis(&raw)?;

    info!(suggestions = analysis.suggestions.len(), "Suggested changes");
    Ok(Json(analysis))
}

/// Validate schema-constrained model output
pub fn parse_analysis(raw: &str) -> Result<AnalysisResponse, ServerError> {
    serde_json::from_str(raw).map_err(|e| {
        if e.is_data() {
            ServerError::Validation(format!("LLM data failed validation: {}", e))
        } else {
            ServerError::Validation("LLM returned invalid JSON format.".to_string())
        }
    })
}

#[derive(Debug, Deserialize)]
pub struct ApplyChangesRequest {
    pub approved_changes: Vec<SuggestedChange>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyChangesResponse {
    pub status: String,
    pub changes_applied: usize,
}

/// Handler: POST /api/apply-changes
///
/// Skipped changes are logged, not reported; the response only carries the
/// number of changes that took effect.
pub async fn handle_apply_changes(
    State(state): State<AppState>,
    payload: Result<Json<ApplyChangesRequest>, JsonRejection>,
) -> Result<Json<ApplyChangesResponse>, ServerError> {
    let Json(req) = payload?;

    let _guard = state.write_lock.lock().await;

    let mut collection = state.store.load()?;
    let report = state.engine.apply(&mut collection, &req.approved_changes);
    state.store.save(&collection)?;

    info!(
        submitted = req.approved_changes.len(),
        applied = report.applied,
        warnings = report.warnings.len(),
        "Applied approved changes"
    );

    Ok(Json(ApplyChangesResponse {
        status: "success".to_string(),
        changes_applied: report.applied,
    }))
}

// ============================================================================
// Database access
// ============================================================================

/// Handler: GET /api/get-db
pub async fn handle_get_database(
    State(state): State<AppState>,
) -> Result<Json<DocumentCollection>, ServerError> {
    Ok(Json(state.store.load()?))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
}

/// Handler: POST /api/query-docs
pub async fn handle_query_documents(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ServerError> {
    let Json(req) = payload?;
    let query = required(&req.query, "Query")?;

    let collection = state.store.load()?;
    let database_json = to_prompt_json(&collection)?;
    let answer = state
        .llm
        .generate(&prompts::query_documents_prompt(&database_json, query))
        .await?;

    Ok(Json(QueryResponse { answer }))
}

fn to_prompt_json(collection: &DocumentCollection) -> Result<String, ServerError> {
    serde_json::to_string_pretty(collection)
        .map_err(|e| ServerError::ReadError(format!("Failed to encode document store: {}", e)))
}
