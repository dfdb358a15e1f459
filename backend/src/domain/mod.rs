//! # Domain Layer
//!
//! Business logic for the finances tracker: the transaction service that
//! owns all store mutations and broadcasts live snapshots, the pure
//! aggregation functions, and the view-state coordinators consumed by
//! presentation layers.

pub mod aggregation;
pub mod coordinators;
pub mod transaction_service;

pub use coordinators::{
    CalendarCoordinator, FinancesCoordinator, ProfileCoordinator, SettingsCoordinator,
};
pub use transaction_service::TransactionService;
