//! Transaction service: the single owner of the transaction collection.
//!
//! Every mutation goes through this service, and every mutation ends with a
//! fresh full snapshot of the ordered transaction set broadcast to all
//! subscribers. A new emission fully supersedes the previous one; consumers
//! never receive incremental diffs.

use crate::error::{FinancesError, Result};
use crate::storage::traits::TransactionStorage;
use chrono::{DateTime, Utc};
use shared::{CreateTransactionRequest, Transaction, TransactionCategory, TransactionType};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[derive(Clone)]
pub struct TransactionService {
    repository: Arc<dyn TransactionStorage>,
    snapshot: Arc<watch::Sender<Vec<Transaction>>>,
}

impl TransactionService {
    /// Build the service and load the initial snapshot from the store.
    pub async fn new(repository: Arc<dyn TransactionStorage>) -> Result<Self> {
        let initial = repository.list_all().await?;
        let (sender, _) = watch::channel(initial);
        Ok(Self {
            repository,
            snapshot: Arc::new(sender),
        })
    }

    /// Subscribe to the live transaction set. The receiver observes a full
    /// ordered snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.snapshot.subscribe()
    }

    /// The most recently broadcast snapshot.
    pub fn current(&self) -> Vec<Transaction> {
        self.snapshot.borrow().clone()
    }

    /// Validate and store a new transaction. Storage failures are surfaced
    /// to the caller so the initiating action can retry.
    pub async fn add_transaction(&self, request: CreateTransactionRequest) -> Result<Transaction> {
        let transaction = Self::build(0, request)?;
        let stored = self.repository.insert(&transaction).await?;
        info!(id = stored.id, "stored transaction");
        self.refresh().await?;
        Ok(stored)
    }

    /// Replace the stored record with the given identifier. Fails with
    /// `NotFound` when the record is absent.
    pub async fn update_transaction(
        &self,
        id: i64,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        let transaction = Self::build(id, request)?;
        self.repository.update(&transaction).await?;
        self.refresh().await?;
        Ok(transaction)
    }

    /// Remove the record with the given identifier. Deleting an absent
    /// record is a no-op. Returns whether a record was removed.
    pub async fn delete_transaction(&self, id: i64) -> Result<bool> {
        let deleted = self.repository.delete(id).await?;
        self.refresh().await?;
        Ok(deleted)
    }

    /// Remove every stored transaction. Irreversible; backs the
    /// "reset balance" action.
    pub async fn reset_balance(&self) -> Result<()> {
        self.repository.delete_all().await?;
        info!("reset balance: cleared all transactions");
        self.refresh().await?;
        Ok(())
    }

    /// Transactions of one type, newest first.
    pub async fn list_by_type(&self, transaction_type: TransactionType) -> Result<Vec<Transaction>> {
        self.repository.list_by_type(transaction_type).await
    }

    /// Transactions of one category, newest first.
    pub async fn list_by_category(
        &self,
        category: TransactionCategory,
    ) -> Result<Vec<Transaction>> {
        self.repository.list_by_category(category).await
    }

    /// Sum of amounts for one type within `[start, end]` inclusive.
    pub async fn sum_by_type_and_range(
        &self,
        transaction_type: TransactionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64> {
        self.repository
            .sum_by_type_and_range(transaction_type, start, end)
            .await
    }

    /// Sum of amounts for one category and type within `[start, end]`
    /// inclusive.
    pub async fn sum_by_category_and_range(
        &self,
        category: TransactionCategory,
        transaction_type: TransactionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64> {
        self.repository
            .sum_by_category_and_range(category, transaction_type, start, end)
            .await
    }

    fn build(id: i64, request: CreateTransactionRequest) -> Result<Transaction> {
        if request.description.is_empty() || request.description.len() > 256 {
            return Err(FinancesError::InvalidTransaction(
                "description must be between 1 and 256 characters".to_string(),
            ));
        }
        if !request.amount.is_finite() || request.amount < 0.0 {
            return Err(FinancesError::InvalidTransaction(
                "amount must be a non-negative magnitude".to_string(),
            ));
        }

        Ok(Transaction {
            id,
            amount: request.amount,
            description: request.description,
            date: request.date.unwrap_or_else(Utc::now),
            transaction_type: request.transaction_type,
            category: request.category,
        })
    }

    async fn refresh(&self) -> Result<()> {
        let all = self.repository.list_all().await?;
        self.snapshot.send_replace(all);
        Ok(())
    }
}
