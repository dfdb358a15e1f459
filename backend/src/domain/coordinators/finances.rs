//! Dashboard view state: the live transaction list, the monthly balance and
//! the per-category monthly totals.
//!
//! The balance window is always the calendar month at the moment of
//! computation, so the displayed balance rolls over silently at month
//! boundaries without user action.

use crate::domain::aggregation;
use crate::domain::transaction_service::TransactionService;
use crate::error::Result;
use chrono::{Local, NaiveDate};
use shared::{
    CategoryTotal, CreateTransactionRequest, MonthlySummary, Transaction, TransactionCategory,
    TransactionType,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

#[derive(Clone)]
pub struct FinancesCoordinator {
    service: TransactionService,
    monthly_balance: Arc<watch::Sender<f64>>,
    category_totals: Arc<watch::Sender<HashMap<TransactionCategory, f64>>>,
}

impl FinancesCoordinator {
    /// Build the coordinator, compute the initial aggregates and start
    /// listening for snapshot emissions from the service.
    pub async fn new(service: TransactionService) -> Self {
        let coordinator = Self {
            service,
            monthly_balance: Arc::new(watch::channel(0.0).0),
            category_totals: Arc::new(watch::channel(HashMap::new()).0),
        };
        coordinator.recompute().await;
        coordinator.spawn_listener();
        coordinator
    }

    /// Live full transaction list, newest first.
    pub fn transactions(&self) -> watch::Receiver<Vec<Transaction>> {
        self.service.subscribe()
    }

    /// Net income minus expenses for the current calendar month.
    pub fn monthly_balance(&self) -> watch::Receiver<f64> {
        self.monthly_balance.subscribe()
    }

    /// Monthly expense totals per category (Salary excluded).
    pub fn category_totals(&self) -> watch::Receiver<HashMap<TransactionCategory, f64>> {
        self.category_totals.subscribe()
    }

    /// Snapshot of the current dashboard aggregates.
    pub fn summary(&self) -> MonthlySummary {
        let totals = self.category_totals.borrow().clone();
        let category_totals = TransactionCategory::ALL
            .iter()
            .filter(|category| **category != TransactionCategory::Salary)
            .map(|category| CategoryTotal {
                category: *category,
                total: totals.get(category).copied().unwrap_or(0.0),
            })
            .collect();

        MonthlySummary {
            balance: *self.monthly_balance.borrow(),
            category_totals,
        }
    }

    /// Store a new transaction. Storage failures surface to the caller;
    /// the aggregates recompute before this returns.
    pub async fn add_transaction(&self, request: CreateTransactionRequest) -> Result<Transaction> {
        let stored = self.service.add_transaction(request).await?;
        self.recompute().await;
        Ok(stored)
    }

    /// Replace a stored transaction by identifier.
    pub async fn update_transaction(
        &self,
        id: i64,
        request: CreateTransactionRequest,
    ) -> Result<Transaction> {
        let updated = self.service.update_transaction(id, request).await?;
        self.recompute().await;
        Ok(updated)
    }

    /// Delete one transaction; a missing identifier is a no-op.
    pub async fn delete_transaction(&self, id: i64) -> Result<bool> {
        let deleted = self.service.delete_transaction(id).await?;
        self.recompute().await;
        Ok(deleted)
    }

    /// Clear every transaction ("reset balance").
    pub async fn reset_balance(&self) -> Result<()> {
        self.service.reset_balance().await?;
        self.recompute().await;
        Ok(())
    }

    fn spawn_listener(&self) {
        let mut snapshots = self.service.subscribe();
        let coordinator = self.clone();
        tokio::spawn(async move {
            // Lives until the process ends; each emission fully supersedes
            // the previous aggregates.
            while snapshots.changed().await.is_ok() {
                coordinator.recompute().await;
            }
        });
    }

    /// Recompute the aggregates for the month containing "now". Faults
    /// degrade to zero values; derived views never fail.
    pub(crate) async fn recompute(&self) {
        let today = Local::now().date_naive();
        let (balance, totals) = match self.compute(today).await {
            Ok(values) => values,
            Err(e) => {
                warn!("monthly aggregation failed, substituting empty totals: {e}");
                (0.0, HashMap::new())
            }
        };
        self.monthly_balance.send_replace(balance);
        self.category_totals.send_replace(totals);
    }

    async fn compute(
        &self,
        today: NaiveDate,
    ) -> Result<(f64, HashMap<TransactionCategory, f64>)> {
        let (start, end) = aggregation::month_range(today)?;

        let income = self
            .service
            .sum_by_type_and_range(TransactionType::Income, start, end)
            .await?;
        let expenses = self
            .service
            .sum_by_type_and_range(TransactionType::Expense, start, end)
            .await?;

        let mut totals = HashMap::new();
        for category in TransactionCategory::ALL {
            // Salary never appears in the expense summary
            if category == TransactionCategory::Salary {
                continue;
            }
            let total = self
                .service
                .sum_by_category_and_range(category, TransactionType::Expense, start, end)
                .await?;
            totals.insert(category, total);
        }

        Ok((income - expenses, totals))
    }
}
