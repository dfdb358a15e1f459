//! # REST API for the Dashboard Summary
//!
//! The monthly balance and per-category totals for the current calendar
//! month. A derived read: it never fails, it can only degrade to zeros.

use axum::{extract::State, response::Json};
use tracing::info;

use crate::AppState;
use shared::MonthlySummary;

/// Current monthly balance and category totals
pub async fn get_summary(State(state): State<AppState>) -> Json<MonthlySummary> {
    info!("GET /api/summary");
    Json(state.finances.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialize_backend;
    use crate::storage::prefs::PreferencesConnection;
    use crate::storage::sqlite::DbConnection;
    use chrono::{Local, Utc};
    use shared::{CreateTransactionRequest, TransactionCategory, TransactionType};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_summary_reports_balance_and_serializes_cleanly() {
        let db = DbConnection::init_test().await.unwrap();
        let dir = TempDir::new().unwrap();
        let prefs = PreferencesConnection::new(dir.path()).unwrap();
        let state = initialize_backend(db, prefs).await.unwrap();

        let now = Local::now().with_timezone(&Utc);
        state
            .finances
            .add_transaction(CreateTransactionRequest {
                amount: 1000.0,
                description: "Salary".to_string(),
                transaction_type: TransactionType::Income,
                category: TransactionCategory::Salary,
                date: Some(now),
            })
            .await
            .unwrap();
        state
            .finances
            .add_transaction(CreateTransactionRequest {
                amount: 200.0,
                description: "Groceries".to_string(),
                transaction_type: TransactionType::Expense,
                category: TransactionCategory::DailyExpense,
                date: Some(now),
            })
            .await
            .unwrap();

        let Json(summary) = get_summary(State(state)).await;
        assert_eq!(summary.balance, 800.0);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["balance"], 800.0);
        let categories: Vec<&str> = value["category_totals"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["category"].as_str().unwrap())
            .collect();
        assert!(!categories.contains(&"Salary"));
        assert!(categories.contains(&"DailyExpense"));
    }
}
