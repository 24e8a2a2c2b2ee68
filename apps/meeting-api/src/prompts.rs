//! Prompt templates for the meeting assistant

use serde_json::{json, Value};
use shared_types::OperationType;

/// Returned verbatim when the chatbot declines an off-topic question
pub const OFF_TOPIC_REPLY: &str = "I apologize, but I'm specifically designed to assist with legal, compliance, and regulatory matters. Your question doesn't appear to be related to these areas. Please ask questions about legal terms, compliance requirements, environmental regulations, or similar topics, and I'll be happy to help!";

/// What the document Q&A prompt tells the model to say when it has no answer
pub const NOT_FOUND_ANSWER: &str = "I cannot find that information in the provided documents.";

/// Asks for a bare YES/NO on whether the message is in scope
pub fn classification_prompt(message: &str) -> String {
    format!(
        r#"
You are a legal and compliance AI assistant. Analyze the following user query and determine if it's related to:
- Legal matters
- Compliance regulations
- Environmental regulations
- Contractual terms
- Corporate governance
- Risk management
- Regulatory requirements
- Any professional/business legal context

User query: "{message}"

Respond with ONLY "YES" if it's related to any of the above topics, or "NO" if it's not.
"#
    )
}

/// True when the classifier reply contains YES
pub fn is_affirmative(classification: &str) -> bool {
    classification.trim().to_uppercase().contains("YES")
}

pub fn legal_answer_prompt(message: &str) -> String {
    format!(
        r#"
You are a knowledgeable legal and compliance assistant. A user has asked the following question:

"{message}"

Provide a helpful, professional, and accurate response. Follow these guidelines:
1. Keep your response SHORT and CONCISE (2-3 sentences or 1 short paragraph)
2. Give a direct answer to their question
3. Only provide detailed explanations if the user explicitly asks for more details (e.g., "explain more", "tell me more", "describe in detail", "elaborate")
4. If the question is simple, give a simple answer
5. Avoid lengthy explanations unless specifically requested

Be brief and to the point.
"#
    )
}

pub fn extract_table_prompt(transcript: &str) -> String {
    format!(
        "You are a legal meeting analysis assistant. \
         Given the transcript, extract a JSON array of key legal items \
         with fields: Clause, Description, Risk Level, Responsible Person, Deadline. \
         Respond ONLY in JSON format.\n\n\
         Transcript:\n{transcript}"
    )
}

pub fn action_items_prompt(transcript: &str) -> String {
    format!(
        "You are a legal operations assistant. \
         From the following meeting transcript, extract a JSON array of clear action items \
         with fields: action, responsible, deadline. Respond ONLY in JSON format.\n\n\
         Transcript:\n{transcript}"
    )
}

/// Maps a transcript onto concrete edits against the whole document database
pub fn suggest_changes_prompt(database_json: &str, transcript: &str) -> String {
    format!(
        r#"
You are an expert legal assistant. Your task is to analyze a meeting transcript and compare it against a database of legal documents. You must find all specific, actionable changes discussed in the transcript and map them to the correct document and clause in the database.

STRICTLY follow the 'AnalysisResponse' JSON schema you have been given.

---
HERE IS THE ENTIRE DOCUMENT DATABASE (db.json):
{database_json}
---

HERE IS THE MEETING TRANSCRIPT:
{transcript}
---

**CRUCIAL INSTRUCTIONS FOR ANALYSIS:**
1.  **Natural Language Mapping:** The transcript will use natural, conversational language, not technical field names. You MUST map this natural language to the correct database fields.
    * **Example 1:** If the transcript says "The parties are 'Global Innovations Inc.' and 'DataWeavers Ltd.'", you must map this to `entity_1_name: "Global Innovations Inc."` and `entity_2_name: "DataWeavers Ltd."`.
    * **Example 2:** If the transcript says "The governing law should be 'State of Delaware'", you must find the 'Governing Law' clause and update its text.
    * **Example 3:** If the transcript says "The agreement was signed 'November 1st, 2025'", you must map this to `execution_date: "2025-11-01"`.

2.  **Document Identification:** People will refer to documents by their *name* (e.g., "the 'Sample Agreement'") not their `doc_id`. You must use the `doc_name` in the database to find the correct document and then use that document's `doc_id` in your response.

3.  **Implied Actions:** A user saying "Let's get rid of the 'Liability' clause" implies a `DELETE_CLAUSE` operation. A user saying "We need to add a Force Majeure clause" implies an `ADD_CLAUSE` operation.

Now, analyze the transcript and extract *all* suggested changes based on these rules.
"#
    )
}

/// Answers a question using only the document database as context
pub fn query_documents_prompt(database_json: &str, query: &str) -> String {
    format!(
        r#"
You are a helpful legal assistant. Your job is to answer the user's question based *only* on the document database provided.

**Rules:**
1.  Read the user's question.
2.  Find the answer within the 'DOCUMENT DATABASE' context.
3.  Answer the question in a very brief, clear, natural language.
4.  **Do not** make up information. If the answer is not in the database, say "{NOT_FOUND_ANSWER}"
5.  You do not need to return JSON. Just provide a helpful text answer.

---
**DOCUMENT DATABASE (db.json):**
{database_json}
---

**USER'S QUESTION:**
{query}
"#
    )
}

/// Non-null string field each operation must name, if any
fn required_target(op: OperationType) -> Option<&'static str> {
    match op {
        OperationType::ModifyMetadata => Some("target_field"),
        OperationType::ModifyClause | OperationType::DeleteClause => Some("target_clause_id"),
        OperationType::AddClause => None,
    }
}

fn clause_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "clause_id": {"type": "string"},
            "title": {"type": "string"},
            "text": {"type": "string"}
        },
        "required": ["clause_id", "title", "text"]
    })
}

/// `new_value` shape for one operation; `None` when the operation takes no value
fn new_value_schema(op: OperationType) -> Option<Value> {
    match op {
        OperationType::ModifyMetadata => Some(json!({
            "anyOf": [
                {"type": "string"},
                {"type": "number"},
                {"type": "boolean"},
                {"type": "object"},
                {"type": "array"}
            ],
            "description": "The new value for the metadata field."
        })),
        OperationType::ModifyClause => Some(json!({
            "anyOf": [{"type": "string"}, clause_schema()],
            "description": "New clause text, or an object with the new title and text."
        })),
        OperationType::AddClause => Some(clause_schema()),
        OperationType::DeleteClause => None,
    }
}

/// One `anyOf` branch of the suggestion list, pinned to a single operation
fn suggestion_schema(op: OperationType) -> Value {
    let mut properties = json!({
        "doc_id": {
            "type": "string",
            "description": "The doc_id from db.json that this change applies to."
        },
        "operation_type": {
            "type": "string",
            "enum": [op.as_str()]
        },
        "reasoning": {
            "type": "string",
            "description": "The exact snippet or summary from the transcript that justifies this change."
        },
        "old_value": {
            "anyOf": [{"type": "string"}, {"type": "object"}, {"type": "null"}],
            "description": "The current value, if known."
        }
    });
    let mut required = vec!["doc_id", "operation_type", "reasoning"];

    if let Some(target) = required_target(op) {
        let description = match op {
            OperationType::ModifyMetadata => {
                "The top-level key to change (e.g., 'termination_notice')."
            }
            _ => "The 'clause_id' of the clause to change or remove.",
        };
        properties[target] = json!({"type": "string", "description": description});
        required.push(target);
    }
    if let Some(value) = new_value_schema(op) {
        properties["new_value"] = value;
        required.push("new_value");
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// JSON schema the model is constrained to when suggesting changes.
///
/// Each operation gets its own branch so a reply that satisfies the schema
/// also deserializes into `AnalysisResponse`.
pub fn analysis_response_schema() -> Value {
    let branches: Vec<Value> = OperationType::ALL.into_iter().map(suggestion_schema).collect();

    json!({
        "type": "object",
        "properties": {
            "suggestions": {
                "type": "array",
                "description": "A list of all suggested changes found in the transcript.",
                "items": {"anyOf": branches}
            }
        },
        "required": ["suggestions"]
    })
}
