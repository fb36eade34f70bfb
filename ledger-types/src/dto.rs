//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─────────────────────────────────────────────────────────────────────────────
// Transaction DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to record a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Label for the transaction
    #[schema(example = "Salary")]
    pub text: String,
    /// Positive for income, negative for expenses
    #[schema(example = 2500.0)]
    pub amount: f64,
}

/// Request to change an existing transaction.
///
/// Omitted fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateTransactionRequest {
    /// New label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Groceries")]
    pub text: Option<String>,
    /// New amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!(-42.5))]
    pub amount: Option<f64>,
}

impl UpdateTransactionRequest {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.amount.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Error DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// JSON body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable message
    #[schema(example = "Validation failed")]
    pub error: String,
    /// HTTP status code
    #[schema(example = 400)]
    pub code: u16,
    /// Per-field messages, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = json!({"amount": ["This field is required."]}))]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}
