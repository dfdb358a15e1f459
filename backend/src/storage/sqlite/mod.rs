pub mod db;
pub mod transaction_repository;

pub use db::DbConnection;
pub use transaction_repository::SqliteTransactionRepository;
