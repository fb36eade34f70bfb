//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use utoipa::OpenApi;

use ledger_types::{
    AppError, CreateTransactionRequest, ErrorResponse, TransactionId, TransactionRepository,
    UpdateTransactionRequest, ValidationErrors, validation,
};

use crate::LedgerService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: TransactionRepository> {
    pub service: LedgerService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self.0 {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(errors.fields().clone()),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// Parses an id path segment.
///
/// Only the canonical lowercase hyphenated form names a transaction. Anything
/// else is a 404 rather than a 400.
fn parse_id(id: &str) -> Result<TransactionId, ApiError> {
    let not_found = || ApiError(AppError::NotFound(format!("Transaction {} not found", id)));

    let parsed: TransactionId = id.parse().map_err(|_| not_found())?;
    if parsed.to_string() != id {
        return Err(not_found());
    }
    Ok(parsed)
}

/// Unwraps a JSON body, turning extractor rejections into JSON errors.
///
/// A number too large for `f64` fails JSON parsing itself; when it sits in a
/// known field it is reported against that field.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        let message = rejection.body_text();
        let field_message = match out_of_range_field(&message) {
            Some(field @ "amount") => Some((field, validation::NOT_A_NUMBER)),
            Some(field @ "text") => Some((field, validation::NOT_A_STRING)),
            _ => None,
        };

        match field_message {
            Some((field, msg)) => {
                let mut errors = ValidationErrors::new();
                errors.add(field, msg);
                AppError::Validation(errors).into()
            }
            None => AppError::BadRequest(message).into(),
        }
    })
}

/// Field path of a "number out of range" parse error, e.g. `amount` in
/// `...as JSON: amount: number out of range at line 1 column 20`.
fn out_of_range_field(message: &str) -> Option<&str> {
    let (head, _) = message.split_once(": number out of range")?;
    head.rsplit(": ").next()
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Collection
// ─────────────────────────────────────────────────────────────────────────────

/// List all transactions.
#[tracing::instrument(skip(state))]
pub async fn list_transactions<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.service.list_transactions().await?;
    Ok(Json(transactions))
}

/// Record a new transaction.
#[tracing::instrument(skip(state, payload))]
pub async fn create_transaction<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(payload)?;
    let req = CreateTransactionRequest::from_json(&body).map_err(AppError::from)?;

    let tx = state.service.create_transaction(req).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// Totals across all transactions.
#[tracing::instrument(skip(state))]
pub async fn summary<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.service.summary().await?;
    Ok(Json(summary))
}

// ─────────────────────────────────────────────────────────────────────────────
// Item
// ─────────────────────────────────────────────────────────────────────────────

/// Get transaction by ID.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn get_transaction<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    let tx = state.service.get_transaction(id).await?;
    Ok(Json(tx))
}

/// Update a transaction. Serves both PUT and PATCH.
#[tracing::instrument(skip(state, payload), fields(transaction_id = %id))]
pub async fn update_transaction<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let body = json_body(payload)?;
    let req = UpdateTransactionRequest::from_json(&body).map_err(AppError::from)?;

    let tx = state.service.update_transaction(id, req).await?;
    Ok(Json(tx))
}

/// Delete a transaction.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn delete_transaction<R: TransactionRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;

    state.service.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
