//! Domain models for the ledger service.

pub mod summary;
pub mod transaction;

pub use summary::TransactionSummary;
pub use transaction::{Transaction, TransactionId};
