//! Aggregate view over a set of transactions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::Transaction;

/// Balance, income and expense totals across transactions.
///
/// Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct TransactionSummary {
    /// Sum of all amounts
    #[schema(example = 90.0)]
    pub balance: f64,
    /// Sum of positive amounts
    #[schema(example = 120.0)]
    pub income: f64,
    /// Sum of negative amounts (zero or less)
    #[schema(example = json!(-30.0))]
    pub expense: f64,
    /// Expenses as a percentage of income, capped at 100
    #[schema(example = 25.0)]
    pub expense_ratio: f64,
    /// Number of transactions summarised
    #[schema(example = 3)]
    pub count: usize,
}

impl TransactionSummary {
    /// Computes the summary for the given transactions.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Self::default();

        for tx in transactions {
            summary.count += 1;
            summary.balance += tx.amount;
            if tx.is_income() {
                summary.income += tx.amount;
            } else if tx.is_expense() {
                summary.expense += tx.amount;
            }
        }

        if summary.income > 0.0 {
            summary.expense_ratio = (summary.expense.abs() / summary.income * 100.0).min(100.0);
        }

        summary
    }
}
