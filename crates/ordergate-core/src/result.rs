//! The uniform result envelope returned by every client operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether an operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure,
}

/// Outcome, human-readable message and optional payload of one operation.
///
/// Success may carry a payload (an order, a list of orders, or the log
/// feed). Failure carries a message taken from the gateway's `detail` field
/// when there is one, and a generic message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub outcome: Outcome,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl OperationResult {
    /// A success without payload.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
            payload: None,
        }
    }

    /// A success carrying the response body verbatim.
    pub fn success_with_payload(message: impl Into<String>, payload: Value) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            message: message.into(),
            payload: None,
        }
    }

    /// A failure whose message comes from the body's `detail` field, or
    /// `fallback` when the body has none.
    pub fn failure_from_body(body: &Value, fallback: &str) -> Self {
        Self::failure(detail_of(body).unwrap_or_else(|| fallback.to_string()))
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Pretty-prints the payload with two-space indentation.
    ///
    /// Returns `None` when there is no payload.
    pub fn render_payload(&self) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|payload| serde_json::to_string_pretty(payload).ok())
    }
}

/// Extracts the gateway's `detail` field as display text.
///
/// Strings are used as-is. Other values (FastAPI validation errors send a
/// list) are rendered as compact JSON. Missing, `null`, `false` and empty
/// string details count as absent.
pub fn detail_of(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
