//! Calendar view state: the selected date, the signed per-day totals and
//! the transactions for the selected date.
//!
//! The daily-totals map recomputes only when the underlying transaction set
//! changes; selecting a date recomputes just the filtered list.

use crate::domain::aggregation;
use crate::domain::transaction_service::TransactionService;
use chrono::{Local, NaiveDate};
use shared::{DayDetail, Transaction};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::warn;

#[derive(Clone)]
pub struct CalendarCoordinator {
    service: TransactionService,
    selected_date: Arc<watch::Sender<NaiveDate>>,
    selected_transactions: Arc<watch::Sender<Vec<Transaction>>>,
    daily_totals: Arc<watch::Sender<HashMap<NaiveDate, f64>>>,
    /// Latest full snapshot, kept so date selection can re-filter without
    /// another store query.
    snapshot: Arc<RwLock<Vec<Transaction>>>,
}

impl CalendarCoordinator {
    /// Build the coordinator with today as the selected date, derive the
    /// initial state and start listening for snapshot emissions.
    pub async fn new(service: TransactionService) -> Self {
        let today = Local::now().date_naive();
        let coordinator = Self {
            service: service.clone(),
            selected_date: Arc::new(watch::channel(today).0),
            selected_transactions: Arc::new(watch::channel(Vec::new()).0),
            daily_totals: Arc::new(watch::channel(HashMap::new()).0),
            snapshot: Arc::new(RwLock::new(Vec::new())),
        };
        coordinator.refresh_from_snapshot(service.current());
        coordinator.spawn_listener();
        coordinator
    }

    /// Currently selected calendar date.
    pub fn selected_date(&self) -> watch::Receiver<NaiveDate> {
        self.selected_date.subscribe()
    }

    /// Transactions whose timestamp falls on the selected date.
    pub fn transactions_for_selected_date(&self) -> watch::Receiver<Vec<Transaction>> {
        self.selected_transactions.subscribe()
    }

    /// Signed totals per calendar day; days without transactions are absent.
    pub fn daily_totals(&self) -> watch::Receiver<HashMap<NaiveDate, f64>> {
        self.daily_totals.subscribe()
    }

    /// Current value of the daily-totals map.
    pub fn current_daily_totals(&self) -> HashMap<NaiveDate, f64> {
        self.daily_totals.borrow().clone()
    }

    /// Select a calendar date and immediately re-filter the transaction
    /// list for it. The daily-totals map is left untouched.
    pub fn select_date(&self, date: NaiveDate) {
        self.selected_date.send_replace(date);
        self.update_selected_transactions();
    }

    /// Detail view for a date: the balance reads from the daily-totals map
    /// with `0.0` as the absent-key default.
    pub fn day_detail(&self, date: NaiveDate) -> DayDetail {
        let balance = self.daily_totals.borrow().get(&date).copied().unwrap_or(0.0);
        let snapshot = self.snapshot.read().unwrap();
        let transactions = aggregation::transactions_on(&snapshot, date).unwrap_or_else(|e| {
            warn!("selected-date filter failed, substituting empty list: {e}");
            Vec::new()
        });

        DayDetail {
            date,
            balance,
            transactions,
        }
    }

    fn spawn_listener(&self) {
        let mut snapshots = self.service.subscribe();
        let coordinator = self.clone();
        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let transactions = snapshots.borrow_and_update().clone();
                coordinator.refresh_from_snapshot(transactions);
            }
        });
    }

    /// A new transaction snapshot arrived: recompute the daily totals and
    /// re-filter the selected date. Faults degrade to empty results.
    fn refresh_from_snapshot(&self, transactions: Vec<Transaction>) {
        let totals = match aggregation::daily_totals(&transactions) {
            Ok(totals) => totals,
            Err(e) => {
                warn!("daily totals aggregation failed, substituting empty map: {e}");
                HashMap::new()
            }
        };

        *self.snapshot.write().unwrap() = transactions;
        self.daily_totals.send_replace(totals);
        self.update_selected_transactions();
    }

    fn update_selected_transactions(&self) {
        let date = *self.selected_date.borrow();
        let filtered = {
            let snapshot = self.snapshot.read().unwrap();
            aggregation::transactions_on(&snapshot, date).unwrap_or_else(|e| {
                warn!("selected-date filter failed, substituting empty list: {e}");
                Vec::new()
            })
        };
        self.selected_transactions.send_replace(filtered);
    }
}
