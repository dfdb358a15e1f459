use crate::error::{FinancesError, Result};
use crate::storage::sqlite::db::DbConnection;
use crate::storage::traits::TransactionStorage;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use shared::{Transaction, TransactionCategory, TransactionType};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Sqlite-backed repository for transaction operations
#[derive(Clone)]
pub struct SqliteTransactionRepository {
    db: DbConnection,
}

impl SqliteTransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_transaction(row: &SqliteRow) -> Result<Transaction> {
        let type_tag: String = row.get("tx_type");
        // A row without a valid sign convention cannot contribute to any
        // sum, so an unknown type tag is a storage fault.
        let transaction_type = TransactionType::from_tag(&type_tag).ok_or_else(|| {
            FinancesError::InvalidTransaction(format!("unknown transaction type tag: {type_tag}"))
        })?;

        let category_tag: String = row.get("category");
        let category = TransactionCategory::from_tag_or_other(&category_tag);

        let date_ms: i64 = row.get("date_ms");
        let date = Utc
            .timestamp_millis_opt(date_ms)
            .single()
            .ok_or_else(|| {
                FinancesError::InvalidTransaction(format!("timestamp out of range: {date_ms}"))
            })?;

        Ok(Transaction {
            id: row.get("id"),
            amount: row.get("amount"),
            description: row.get("description"),
            date,
            transaction_type,
            category,
        })
    }

    fn rows_to_transactions(rows: &[SqliteRow]) -> Result<Vec<Transaction>> {
        rows.iter().map(Self::row_to_transaction).collect()
    }
}

#[async_trait]
impl TransactionStorage for SqliteTransactionRepository {
    async fn insert(&self, transaction: &Transaction) -> Result<Transaction> {
        let mut stored = transaction.clone();

        if transaction.id == 0 {
            let result = sqlx::query(
                r#"
                INSERT INTO transactions (amount, description, date_ms, tx_type, category)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(transaction.amount)
            .bind(&transaction.description)
            .bind(transaction.date.timestamp_millis())
            .bind(transaction.transaction_type.tag())
            .bind(transaction.category.tag())
            .execute(self.db.pool())
            .await?;
            stored.id = result.last_insert_rowid();
        } else {
            sqlx::query(
                r#"
                INSERT INTO transactions (id, amount, description, date_ms, tx_type, category)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(transaction.id)
            .bind(transaction.amount)
            .bind(&transaction.description)
            .bind(transaction.date.timestamp_millis())
            .bind(transaction.transaction_type.tag())
            .bind(transaction.category.tag())
            .execute(self.db.pool())
            .await?;
        }

        Ok(stored)
    }

    async fn update(&self, transaction: &Transaction) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET amount = ?, description = ?, date_ms = ?, tx_type = ?, category = ?
            WHERE id = ?
            "#,
        )
        .bind(transaction.amount)
        .bind(&transaction.description)
        .bind(transaction.date.timestamp_millis())
        .bind(transaction.transaction_type.tag())
        .bind(transaction.category.tag())
        .bind(transaction.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(FinancesError::NotFound(transaction.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM transactions")
            .execute(self.db.pool())
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, description, date_ms, tx_type, category
            FROM transactions
            ORDER BY date_ms DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_transactions(&rows)
    }

    async fn list_by_type(&self, transaction_type: TransactionType) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, description, date_ms, tx_type, category
            FROM transactions
            WHERE tx_type = ?
            ORDER BY date_ms DESC
            "#,
        )
        .bind(transaction_type.tag())
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_transactions(&rows)
    }

    async fn list_by_category(&self, category: TransactionCategory) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, description, date_ms, tx_type, category
            FROM transactions
            WHERE category = ?
            ORDER BY date_ms DESC
            "#,
        )
        .bind(category.tag())
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_transactions(&rows)
    }

    async fn sum_by_type_and_range(
        &self,
        transaction_type: TransactionType,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> Result<f64> {
        let row = sqlx::query(
            r#"
            SELECT SUM(amount) AS total
            FROM transactions
            WHERE tx_type = ? AND date_ms BETWEEN ? AND ?
            "#,
        )
        .bind(transaction_type.tag())
        .bind(start.timestamp_millis())
        .bind(end.timestamp_millis())
        .fetch_one(self.db.pool())
        .await?;

        let total: Option<f64> = row.get("total");
        Ok(total.unwrap_or(0.0))
    }

    async fn sum_by_category_and_range(
        &self,
        category: TransactionCategory,
        transaction_type: TransactionType,
        start: chrono::DateTime<Utc>,
        end: chrono::DateTime<Utc>,
    ) -> Result<f64> {
        let row = sqlx::query(
            r#"
            SELECT SUM(amount) AS total
            FROM transactions
            WHERE category = ? AND tx_type = ? AND date_ms BETWEEN ? AND ?
            "#,
        )
        .bind(category.tag())
        .bind(transaction_type.tag())
        .bind(start.timestamp_millis())
        .bind(end.timestamp_millis())
        .fetch_one(self.db.pool())
        .await?;

        let total: Option<f64> = row.get("total");
        Ok(total.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    // Setup a new repository over a fresh test database
    async fn setup_test() -> SqliteTransactionRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        SqliteTransactionRepository::new(db)
    }

    fn transaction(
        amount: f64,
        description: &str,
        date: DateTime<Utc>,
        transaction_type: TransactionType,
        category: TransactionCategory,
    ) -> Transaction {
        Transaction {
            id: 0,
            amount,
            description: description.to_string(),
            date,
            transaction_type,
            category,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_fresh_id_and_round_trips() {
        let repo = setup_test().await;

        let tx = transaction(
            1000.0,
            "Salary",
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            TransactionType::Income,
            TransactionCategory::Salary,
        );
        let stored = repo.insert(&tx).await.expect("Failed to insert transaction");
        assert!(stored.id > 0, "Insert should assign a fresh identifier");

        // Querying by type and by category must return exactly that record
        let by_type = repo.list_by_type(TransactionType::Income).await.unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0], stored);

        let by_category = repo.list_by_category(TransactionCategory::Salary).await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0], stored);
    }

    #[tokio::test]
    async fn test_insert_preserves_millisecond_precision() {
        let repo = setup_test().await;

        let date = Utc.timestamp_millis_opt(1748771445123).single().unwrap();
        let tx = transaction(5.0, "Coffee", date, TransactionType::Expense, TransactionCategory::DailyExpense);
        repo.insert(&tx).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].date, date);
        assert_eq!(all[0].date.timestamp_millis(), 1748771445123);
    }

    #[tokio::test]
    async fn test_list_all_orders_descending_by_date() {
        let repo = setup_test().await;

        let older = transaction(
            10.0,
            "Older",
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            TransactionType::Expense,
            TransactionCategory::Other,
        );
        let newer = transaction(
            20.0,
            "Newer",
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
            TransactionType::Expense,
            TransactionCategory::Other,
        );
        // Insert oldest last so ordering cannot come from insertion order
        repo.insert(&newer).await.unwrap();
        repo.insert(&older).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].description, "Newer");
        assert_eq!(all[1].description, "Older");
    }

    #[tokio::test]
    async fn test_update_replaces_matching_record() {
        let repo = setup_test().await;

        let stored = repo
            .insert(&transaction(
                15.0,
                "Streaming",
                Utc.with_ymd_and_hms(2025, 6, 5, 8, 0, 0).unwrap(),
                TransactionType::Expense,
                TransactionCategory::Subscription,
            ))
            .await
            .unwrap();

        let mut updated = stored.clone();
        updated.amount = 18.0;
        updated.description = "Streaming (price hike)".to_string();
        repo.update(&updated).await.expect("Failed to update transaction");

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].amount, 18.0);
        assert_eq!(all[0].description, "Streaming (price hike)");
    }

    #[tokio::test]
    async fn test_update_missing_record_is_an_error() {
        let repo = setup_test().await;

        let ghost = Transaction {
            id: 9999,
            amount: 1.0,
            description: "Ghost".to_string(),
            date: Utc.with_ymd_and_hms(2025, 6, 5, 8, 0, 0).unwrap(),
            transaction_type: TransactionType::Expense,
            category: TransactionCategory::Other,
        };

        let err = repo.update(&ghost).await.expect_err("Update of missing id must fail");
        assert!(matches!(err, FinancesError::NotFound(9999)));
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let repo = setup_test().await;

        let first = repo
            .insert(&transaction(
                10.0,
                "First",
                Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
                TransactionType::Expense,
                TransactionCategory::Other,
            ))
            .await
            .unwrap();
        repo.insert(&transaction(
            20.0,
            "Second",
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
            TransactionType::Income,
            TransactionCategory::Other,
        ))
        .await
        .unwrap();

        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap(), "Second delete finds nothing");
        assert_eq!(repo.list_all().await.unwrap().len(), 1);

        repo.delete_all().await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
        assert!(repo.list_by_type(TransactionType::Income).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sum_by_type_and_range_is_inclusive() {
        let repo = setup_test().await;

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();

        // Exactly on both bounds, plus one just outside
        repo.insert(&transaction(100.0, "On start", start, TransactionType::Income, TransactionCategory::Salary))
            .await
            .unwrap();
        repo.insert(&transaction(50.0, "On end", end, TransactionType::Income, TransactionCategory::Other))
            .await
            .unwrap();
        repo.insert(&transaction(
            999.0,
            "Outside",
            end + chrono::Duration::milliseconds(1),
            TransactionType::Income,
            TransactionCategory::Other,
        ))
        .await
        .unwrap();

        let total = repo
            .sum_by_type_and_range(TransactionType::Income, start, end)
            .await
            .unwrap();
        assert_eq!(total, 150.0);
    }

    #[tokio::test]
    async fn test_sum_returns_zero_when_nothing_matches() {
        let repo = setup_test().await;

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();

        let total = repo
            .sum_by_type_and_range(TransactionType::Expense, start, end)
            .await
            .unwrap();
        assert_eq!(total, 0.0, "Empty match must sum to zero, not an absent value");

        let category_total = repo
            .sum_by_category_and_range(TransactionCategory::Leisure, TransactionType::Expense, start, end)
            .await
            .unwrap();
        assert_eq!(category_total, 0.0);
    }

    #[tokio::test]
    async fn test_sum_by_category_filters_both_category_and_type() {
        let repo = setup_test().await;

        let date = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        repo.insert(&transaction(200.0, "Groceries", date, TransactionType::Expense, TransactionCategory::DailyExpense))
            .await
            .unwrap();
        repo.insert(&transaction(80.0, "Cinema", date, TransactionType::Expense, TransactionCategory::Leisure))
            .await
            .unwrap();
        // Income in the same category must not count toward the expense total
        repo.insert(&transaction(30.0, "Refund", date, TransactionType::Income, TransactionCategory::DailyExpense))
            .await
            .unwrap();

        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap();

        let total = repo
            .sum_by_category_and_range(TransactionCategory::DailyExpense, TransactionType::Expense, start, end)
            .await
            .unwrap();
        assert_eq!(total, 200.0);
    }

    #[tokio::test]
    async fn test_unknown_category_tag_reads_back_as_other() {
        let repo = setup_test().await;

        // Simulate a row written by a future schema revision
        sqlx::query(
            "INSERT INTO transactions (amount, description, date_ms, tx_type, category)
             VALUES (12.5, 'Mystery', 1748771445000, 'expense', 'crypto')",
        )
        .execute(repo.db.pool())
        .await
        .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category, TransactionCategory::Other);
    }
}
