//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use ledger_types::{
    CreateTransactionRequest, RepoError, Transaction, TransactionId, TransactionRepository,
    UpdateTransactionRequest,
};

use crate::migration_statements;
use crate::types::PgTransactionRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file one at a time.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for stmt in migration_statements(sql) {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_transactions_pg.sql"),
        "0001",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::debug!("PostgreSQL schema ready");
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl TransactionRepository for PostgresRepo {
    async fn create_transaction(
        &self,
        req: CreateTransactionRequest,
    ) -> Result<Transaction, RepoError> {
        let tx = Transaction::new(req.text, req.amount);

        sqlx::query(
            r#"INSERT INTO transactions (id, text, amount, created_at) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(tx.id.into_uuid())
        .bind(&tx.text)
        .bind(tx.amount)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(tx)
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Option<Transaction>, RepoError> {
        let row: Option<PgTransactionRow> = sqlx::query_as(
            r#"SELECT id, text, amount, created_at FROM transactions WHERE id = $1"#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(PgTransactionRow::into_domain))
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
        let rows: Vec<PgTransactionRow> = sqlx::query_as(
            r#"SELECT id, text, amount, created_at FROM transactions ORDER BY created_at ASC, id ASC"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(PgTransactionRow::into_domain).collect())
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        req: UpdateTransactionRequest,
    ) -> Result<Option<Transaction>, RepoError> {
        let row: Option<PgTransactionRow> = sqlx::query_as(
            r#"UPDATE transactions
               SET text = COALESCE($1, text), amount = COALESCE($2, amount)
               WHERE id = $3
               RETURNING id, text, amount, created_at"#,
        )
        .bind(req.text)
        .bind(req.amount)
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.map(PgTransactionRow::into_domain))
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM transactions WHERE id = $1"#)
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
