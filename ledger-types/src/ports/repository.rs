//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory mocks) implement this trait.

use crate::domain::{Transaction, TransactionId};
use crate::dto::{CreateTransactionRequest, UpdateTransactionRequest};
use crate::error::RepoError;

/// The repository port for transaction records.
///
/// Each write must be atomic for the single record it touches.
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Persists a new transaction, assigning its id and creation time.
    async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, RepoError>;

    /// Gets a transaction by ID.
    async fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError>;

    /// Lists all transactions, oldest first.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError>;

    /// Applies the set fields of `req` to a transaction.
    ///
    /// Returns `None` when no transaction has that id.
    async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Option<Transaction>, RepoError>;

    /// Deletes a transaction. Returns `false` when no transaction has that id.
    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, RepoError>;
}
