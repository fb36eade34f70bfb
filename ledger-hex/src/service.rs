//! Ledger Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - pure orchestration.

use ledger_types::{
    AppError, CreateTransactionRequest, Transaction, TransactionId, TransactionRepository,
    TransactionSummary, UpdateTransactionRequest,
};

/// Application service for transaction records.
///
/// Generic over `R: TransactionRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo
/// - Compile-time checks for port implementation
pub struct LedgerService<R: TransactionRepository> {
    repo: R,
}

impl<R: TransactionRepository> LedgerService<R> {
    /// Creates a new ledger service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Collection Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists every transaction.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        self.repo.list_transactions().await.map_err(Into::into)
    }

    /// Records a new transaction.
    pub async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let req = req.validated()?;

        let tx = self.repo.create_transaction(req).await?;
        tracing::info!(transaction_id = %tx.id, amount = tx.amount, "transaction created");
        Ok(tx)
    }

    /// Computes balance, income and expense totals over every transaction.
    pub async fn summary(&self) -> Result<TransactionSummary, AppError> {
        let transactions = self.repo.list_transactions().await?;
        Ok(TransactionSummary::from_transactions(&transactions))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Item Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a transaction by ID.
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, AppError> {
        self.repo
            .get_transaction(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| not_found(id)))
    }

    /// Applies the supplied fields to a transaction.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Transaction, AppError> {
        let req = req.validated()?;

        let tx = self
            .repo
            .update_transaction(id, req)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(transaction_id = %tx.id, "transaction updated");
        Ok(tx)
    }

    /// Deletes a transaction.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
        if !self.repo.delete_transaction(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(transaction_id = %id, "transaction deleted");
        Ok(())
    }
}

fn not_found(id: TransactionId) -> AppError {
    AppError::NotFound(format!("Transaction {} not found", id))
}
