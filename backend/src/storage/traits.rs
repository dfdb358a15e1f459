//! # Storage Traits
//!
//! Abstractions over the concrete storage backends. The domain layer works
//! against these traits only, so the sqlite store or the preference files
//! can be swapped without touching business logic.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{Profile, Settings, Transaction, TransactionCategory, TransactionType};

/// Interface for transaction storage operations.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Store a new transaction. When the transaction carries no identifier
    /// (id zero) a fresh unique one is assigned; the stored record is
    /// returned either way.
    async fn insert(&self, transaction: &Transaction) -> Result<Transaction>;

    /// Replace the record matching the transaction's identifier. Fails with
    /// `NotFound` when no such record exists.
    async fn update(&self, transaction: &Transaction) -> Result<()>;

    /// Remove the record with the given identifier.
    /// Returns true if a record was found and deleted.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Clear all records. Irreversible.
    async fn delete_all(&self) -> Result<()>;

    /// All transactions, ordered descending by timestamp.
    async fn list_all(&self) -> Result<Vec<Transaction>>;

    /// Transactions of one type, ordered descending by timestamp.
    async fn list_by_type(&self, transaction_type: TransactionType) -> Result<Vec<Transaction>>;

    /// Transactions of one category, ordered descending by timestamp.
    async fn list_by_category(&self, category: TransactionCategory) -> Result<Vec<Transaction>>;

    /// Sum of amounts for records of the given type whose timestamp falls
    /// within `[start, end]` inclusive. Zero (not absent) when nothing
    /// matches.
    async fn sum_by_type_and_range(
        &self,
        transaction_type: TransactionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64>;

    /// Sum of amounts for records matching both category and type within
    /// `[start, end]` inclusive. Zero when nothing matches.
    async fn sum_by_category_and_range(
        &self,
        category: TransactionCategory,
        transaction_type: TransactionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64>;
}

/// Interface for the `profile` preference namespace.
pub trait ProfileStorage: Send + Sync {
    /// Read the stored profile; defaults when nothing has been saved yet.
    fn load(&self) -> Result<Profile>;

    /// Persist the whole profile.
    fn save(&self, profile: &Profile) -> Result<()>;
}

/// Interface for the `settings` preference namespace.
pub trait SettingsStorage: Send + Sync {
    /// Read the stored settings; defaults when nothing has been saved yet.
    fn load(&self) -> Result<Settings>;

    /// Persist the whole settings record.
    fn save(&self, settings: &Settings) -> Result<()>;
}
