//! # Ledger Client SDK
//!
//! A typed Rust client for the Ledger API.

use std::collections::BTreeMap;

use ledger_types::{
    CreateTransactionRequest, Transaction, TransactionId, TransactionSummary,
    UpdateTransactionRequest,
};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        /// Per-field messages, present on validation failures.
        fields: Option<BTreeMap<String, Vec<String>>>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the server answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Ledger API client.
pub struct LedgerClient {
    base_url: String,
    http: Client,
}

impl LedgerClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists all transactions, oldest first.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
        self.send(Method::GET, "/transactions", None::<&()>).await
    }

    /// Records a new transaction.
    pub async fn create_transaction(
        &self,
        text: &str,
        amount: f64,
    ) -> Result<Transaction, ClientError> {
        let req = CreateTransactionRequest {
            text: text.to_string(),
            amount,
        };
        self.send(Method::POST, "/transactions", Some(&req)).await
    }

    /// Gets a transaction by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, ClientError> {
        self.send(Method::GET, &format!("/transactions/{}", id), None::<&()>)
            .await
    }

    /// Changes the supplied fields of a transaction (PATCH).
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        req: &UpdateTransactionRequest,
    ) -> Result<Transaction, ClientError> {
        self.send(Method::PATCH, &format!("/transactions/{}", id), Some(req))
            .await
    }

    /// Sends both fields of a transaction (PUT).
    pub async fn replace_transaction(
        &self,
        id: TransactionId,
        text: &str,
        amount: f64,
    ) -> Result<Transaction, ClientError> {
        let req = UpdateTransactionRequest {
            text: Some(text.to_string()),
            amount: Some(amount),
        };
        self.send(Method::PUT, &format!("/transactions/{}", id), Some(&req))
            .await
    }

    /// Deletes a transaction.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/transactions/{}", self.base_url, id))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(api_error(resp).await)
        }
    }

    /// Balance, income and expense totals.
    pub async fn summary(&self) -> Result<TransactionSummary, ClientError> {
        self.send(Method::GET, "/transactions/summary", None::<&()>)
            .await
    }

    async fn send<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(resp).await)
        }
    }
}

/// Builds an `Api` error from a non-2xx response, preferring the JSON `error` field.
async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    parse_api_error(status, body)
}

fn parse_api_error(status: StatusCode, body: String) -> ClientError {
    let json = serde_json::from_str::<serde_json::Value>(&body).ok();

    let fields = json
        .as_ref()
        .and_then(|v| v.get("fields"))
        .and_then(|f| serde_json::from_value(f.clone()).ok());
    let message = json
        .as_ref()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);

    ClientError::Api {
        status: status.as_u16(),
        message,
        fields,
    }
}
