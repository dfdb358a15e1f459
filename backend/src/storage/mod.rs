//! # Storage Layer
//!
//! Persistence for the finances tracker: a sqlite-backed transaction store
//! and file-based preference namespaces, both behind traits so the domain
//! layer never depends on a concrete backend.

pub mod prefs;
pub mod sqlite;
pub mod traits;

pub use prefs::PreferencesConnection;
pub use sqlite::{DbConnection, SqliteTransactionRepository};
pub use traits::{ProfileStorage, SettingsStorage, TransactionStorage};
