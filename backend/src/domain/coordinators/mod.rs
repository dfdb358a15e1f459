//! # View-State Coordinators
//!
//! Coordinators hold the UI-relevant derived state and expose it as
//! observable values (`tokio::sync::watch` receivers, replace-on-write).
//! They are constructed exactly once at startup and handed to consumers
//! explicitly; there are no process-wide lazy singletons.

pub mod calendar;
pub mod finances;
pub mod profile;
pub mod settings;

pub use calendar::CalendarCoordinator;
pub use finances::FinancesCoordinator;
pub use profile::ProfileCoordinator;
pub use settings::SettingsCoordinator;
