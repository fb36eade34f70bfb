//! Database row types and their conversion into domain types.
//!
//! SQLite has no native UUID or timestamp columns, so its rows carry strings
//! that are parsed on the way out. PostgreSQL rows map directly.

use ledger_types::{RepoError, Transaction, TransactionId};

/// Formats a timestamp the way the SQLite adapter stores it.
///
/// Fixed microsecond precision keeps lexical and chronological order equal.
#[cfg(feature = "sqlite")]
pub fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Transaction row as stored by SQLite.
#[cfg(feature = "sqlite")]
#[derive(sqlx::FromRow)]
pub struct SqliteTransactionRow {
    pub id: String,
    pub text: String,
    pub amount: f64,
    pub created_at: String,
}

#[cfg(feature = "sqlite")]
impl SqliteTransactionRow {
    /// Convert database row to domain Transaction.
    pub fn into_domain(self) -> Result<Transaction, RepoError> {
        let id = uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(Transaction::from_parts(
            TransactionId::from_uuid(id),
            self.text,
            self.amount,
            created_at,
        ))
    }
}

/// Transaction row as stored by PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(sqlx::FromRow)]
pub struct PgTransactionRow {
    pub id: uuid::Uuid,
    pub text: String,
    pub amount: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl PgTransactionRow {
    /// Convert database row to domain Transaction.
    pub fn into_domain(self) -> Transaction {
        Transaction::from_parts(
            TransactionId::from_uuid(self.id),
            self.text,
            self.amount,
            self.created_at,
        )
    }
}
