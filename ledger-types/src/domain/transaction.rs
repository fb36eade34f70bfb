//! Transaction domain model.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransactionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A recorded income or expense.
///
/// `id` and `created_at` are assigned when the record is created and never
/// change afterwards. `text` and `amount` are the only mutable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Free-form label, e.g. "Salary" or "Groceries"
    #[schema(example = "Groceries")]
    pub text: String,
    /// Positive for income, negative for expenses
    #[schema(example = json!(-42.5))]
    pub amount: f64,
    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new transaction with a fresh id and the current time.
    ///
    /// The timestamp is truncated to microseconds, the finest precision
    /// both supported stores keep.
    pub fn new(text: impl Into<String>, amount: f64) -> Self {
        Self {
            id: TransactionId::new(),
            text: text.into(),
            amount,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// Reconstructs a transaction from database fields.
    pub fn from_parts(
        id: TransactionId,
        text: String,
        amount: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            amount,
            created_at,
        }
    }

    /// Returns true if this transaction is money coming in.
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Returns true if this transaction is money going out.
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}
