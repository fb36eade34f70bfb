//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use ledger_types::domain::{Transaction, TransactionId, TransactionSummary};
use ledger_types::dto::{CreateTransactionRequest, ErrorResponse, UpdateTransactionRequest};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all transactions
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "Every transaction, oldest first", body = Vec<Transaction>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_transactions() {}

/// Record a new transaction
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_transaction() {}

/// Balance, income and expense totals
#[utoipa::path(
    get,
    path = "/transactions/summary",
    tag = "transactions",
    responses(
        (status = 200, description = "Totals across all transactions", body = TransactionSummary),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn summary() {}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = TransactionId, Path, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 200, description = "Transaction details", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
async fn get_transaction() {}

/// Replace the fields of a transaction
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "transactions",
    request_body = UpdateTransactionRequest,
    params(
        ("id" = TransactionId, Path, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
async fn replace_transaction() {}

/// Change some fields of a transaction
#[utoipa::path(
    patch,
    path = "/transactions/{id}",
    tag = "transactions",
    request_body = UpdateTransactionRequest,
    params(
        ("id" = TransactionId, Path, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
async fn update_transaction() {}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = TransactionId, Path, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
async fn delete_transaction() {}

/// OpenAPI documentation for the Ledger API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledger Transaction Service API",
        version = "1.0.0",
        description = "Record income and expenses, and read back balances.\n\nPositive amounts are income, negative amounts are expenses.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_transactions,
        create_transaction,
        summary,
        get_transaction,
        replace_transaction,
        update_transaction,
        delete_transaction,
    ),
    components(
        schemas(
            Transaction,
            TransactionId,
            TransactionSummary,
            CreateTransactionRequest,
            UpdateTransactionRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transactions", description = "Transaction records and totals"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();

        for path in [
            "/health",
            "/transactions",
            "/transactions/summary",
            "/transactions/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
