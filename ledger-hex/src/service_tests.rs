//! LedgerService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use ledger_types::{
        AppError, CreateTransactionRequest, RepoError, Transaction, TransactionId,
        TransactionRepository, UpdateTransactionRequest,
    };

    use crate::LedgerService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        transactions: Mutex<Vec<Transaction>>,
        fail: bool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                transactions: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        /// A repository whose every call fails like a lost connection.
        pub fn failing() -> Self {
            Self {
                transactions: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.fail {
                return Err(RepoError::Database("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TransactionRepository for MockRepo {
        async fn create_transaction(
            &self,
            req: CreateTransactionRequest,
        ) -> Result<Transaction, RepoError> {
            self.check()?;
            let tx = Transaction::new(req.text, req.amount);
            self.transactions.lock().unwrap().push(tx.clone());
            Ok(tx)
        }

        async fn get_transaction(
            &self,
            id: TransactionId,
        ) -> Result<Option<Transaction>, RepoError> {
            self.check()?;
            Ok(self
                .transactions
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned())
        }

        async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
            self.check()?;
            Ok(self.transactions.lock().unwrap().clone())
        }

        async fn update_transaction(
            &self,
            id: TransactionId,
            req: UpdateTransactionRequest,
        ) -> Result<Option<Transaction>, RepoError> {
            self.check()?;
            let mut transactions = self.transactions.lock().unwrap();
            let Some(tx) = transactions.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            if let Some(text) = req.text {
                tx.text = text;
            }
            if let Some(amount) = req.amount {
                tx.amount = amount;
            }
            Ok(Some(tx.clone()))
        }

        async fn delete_transaction(&self, id: TransactionId) -> Result<bool, RepoError> {
            self.check()?;
            let mut transactions = self.transactions.lock().unwrap();
            let before = transactions.len();
            transactions.retain(|t| t.id != id);
            Ok(transactions.len() < before)
        }
    }

    fn create_req(text: &str, amount: f64) -> CreateTransactionRequest {
        CreateTransactionRequest {
            text: text.to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_create_transaction_success() {
        let service = LedgerService::new(MockRepo::new());

        let tx = service
            .create_transaction(create_req("  Salary ", 2500.0))
            .await
            .unwrap();

        assert_eq!(tx.text, "Salary");
        assert_eq!(tx.amount, 2500.0);

        let fetched = service.get_transaction(tx.id).await.unwrap();
        assert_eq!(fetched, tx);
    }

    #[tokio::test]
    async fn test_create_transaction_blank_text_fails() {
        let service = LedgerService::new(MockRepo::new());

        let result = service.create_transaction(create_req("   ", 10.0)).await;

        assert!(matches!(result, Err(AppError::Validation(ref e)) if e.field("text").is_some()));
        assert!(service.list_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_transaction_non_finite_amount_fails() {
        let service = LedgerService::new(MockRepo::new());

        let result = service
            .create_transaction(create_req("Broken", f64::NAN))
            .await;

        assert!(matches!(result, Err(AppError::Validation(ref e)) if e.field("amount").is_some()));
    }

    #[tokio::test]
    async fn test_get_transaction_not_found() {
        let service = LedgerService::new(MockRepo::new());

        let result = service.get_transaction(TransactionId::new()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_transactions() {
        let service = LedgerService::new(MockRepo::new());

        for i in 0..3 {
            service
                .create_transaction(create_req(&format!("Item {}", i), i as f64))
                .await
                .unwrap();
        }

        let transactions = service.list_transactions().await.unwrap();

        assert_eq!(transactions.len(), 3);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let service = LedgerService::new(MockRepo::new());

        let created = service
            .create_transaction(create_req("Rent", -800.0))
            .await
            .unwrap();

        let updated = service
            .update_transaction(
                created.id,
                UpdateTransactionRequest {
                    text: Some("Rent (March)".to_string()),
                    amount: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.text, "Rent (March)");
        assert_eq!(updated.amount, -800.0);
    }

    #[tokio::test]
    async fn test_update_invalid_field_fails() {
        let service = LedgerService::new(MockRepo::new());

        let created = service
            .create_transaction(create_req("Rent", -800.0))
            .await
            .unwrap();

        let result = service
            .update_transaction(
                created.id,
                UpdateTransactionRequest {
                    text: Some(String::new()),
                    amount: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(service.get_transaction(created.id).await.unwrap().text, "Rent");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let service = LedgerService::new(MockRepo::new());

        let result = service
            .update_transaction(TransactionId::new(), UpdateTransactionRequest::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_transaction() {
        let service = LedgerService::new(MockRepo::new());

        let created = service
            .create_transaction(create_req("Gym", -30.0))
            .await
            .unwrap();

        service.delete_transaction(created.id).await.unwrap();

        let result = service.get_transaction(created.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = service.delete_transaction(created.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_summary() {
        let service = LedgerService::new(MockRepo::new());

        for (text, amount) in [("Salary", 100.0), ("Rent", -30.0), ("Refund", 20.0)] {
            service
                .create_transaction(create_req(text, amount))
                .await
                .unwrap();
        }

        let summary = service.summary().await.unwrap();

        assert_eq!(summary.balance, 90.0);
        assert_eq!(summary.income, 120.0);
        assert_eq!(summary.expense, -30.0);
        assert_eq!(summary.expense_ratio, 25.0);
        assert_eq!(summary.count, 3);
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let service = LedgerService::new(MockRepo::failing());

        let result = service.list_transactions().await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
