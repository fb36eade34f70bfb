//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use ledger_types::{
    CreateTransactionRequest, RepoError, Transaction, TransactionId, TransactionRepository,
    UpdateTransactionRequest,
};

use crate::migration_statements;
use crate::types::{SqliteTransactionRow, format_timestamp};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if !is_in_memory(database_url) {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives only as long as its connection, so
        // keep exactly one and never recycle it.
        let pool_options = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        tracing::debug!("SQLite schema ready");

        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema if it does not exist yet.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_transactions.sql");
        for stmt in migration_statements(ddl) {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for SqliteRepo {
    async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, RepoError> {
        let tx = Transaction::new(req.text, req.amount);

        sqlx::query(r#"INSERT INTO transactions (id, text, amount, created_at) VALUES (?, ?, ?, ?)"#)
            .bind(tx.id.to_string())
            .bind(&tx.text)
            .bind(tx.amount)
            .bind(format_timestamp(&tx.created_at))
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(tx)
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let id_str = id.to_string();

        let row: Option<SqliteTransactionRow> = sqlx::query_as(
            r#"SELECT id, text, amount, created_at FROM transactions WHERE id = ?"#,
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteTransactionRow::into_domain).transpose()
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
        let rows: Vec<SqliteTransactionRow> = sqlx::query_as(
            r#"SELECT id, text, amount, created_at FROM transactions ORDER BY created_at ASC, id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter()
            .map(SqliteTransactionRow::into_domain)
            .collect()
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Option<Transaction>, RepoError> {
        let id_str = id.to_string();

        // Unset fields bind as NULL and COALESCE keeps the stored value.
        let row: Option<SqliteTransactionRow> = sqlx::query_as(
            r#"UPDATE transactions
               SET text = COALESCE(?, text), amount = COALESCE(?, amount)
               WHERE id = ?
               RETURNING id, text, amount, created_at"#,
        )
        .bind(req.text)
        .bind(req.amount)
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteTransactionRow::into_domain).transpose()
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, RepoError> {
        let id_str = id.to_string();

        let result = sqlx::query(r#"DELETE FROM transactions WHERE id = ?"#)
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
