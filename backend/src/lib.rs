//! # Finances Backend
//!
//! Contains all non-UI logic for the finances tracker application.
//!
//! This crate brings together:
//! - **Domain**: transaction service, aggregation and view-state coordinators
//! - **Storage**: data persistence (sqlite transaction store, preference files)
//! - **IO**: interface layer that exposes functionality to frontends
//!
//! The backend is UI-agnostic: any frontend can drive it through the REST
//! routes or consume the coordinators directly.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (any frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (service, aggregation, coordinators)
//!     ↓
//! Storage Layer (sqlite, preference files)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Construct every component once at startup and wire them explicitly
//! - Set up the REST router with proper CORS configuration
//! - Coordinate between domain logic and data persistence

pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{
    CalendarCoordinator, FinancesCoordinator, ProfileCoordinator, SettingsCoordinator,
    TransactionService,
};
use crate::error::Result;
use crate::storage::prefs::{PreferencesConnection, ProfileRepository, SettingsRepository};
use crate::storage::sqlite::{DbConnection, SqliteTransactionRepository};
use std::sync::Arc;

/// Main application state that holds all coordinators
#[derive(Clone)]
pub struct AppState {
    pub transactions: TransactionService,
    pub finances: FinancesCoordinator,
    pub calendar: CalendarCoordinator,
    pub profile: ProfileCoordinator,
    pub settings: SettingsCoordinator,
}

/// Construct every component exactly once and wire them together. All
/// consumers receive their dependencies explicitly; nothing is initialized
/// lazily behind a global.
pub async fn initialize_backend(
    db: DbConnection,
    prefs: PreferencesConnection,
) -> Result<AppState> {
    info!("Setting up storage");
    let repository = Arc::new(SqliteTransactionRepository::new(db));

    info!("Setting up domain model");
    let transactions = TransactionService::new(repository).await?;
    let finances = FinancesCoordinator::new(transactions.clone()).await;
    let calendar = CalendarCoordinator::new(transactions.clone()).await;
    let profile = ProfileCoordinator::new(Arc::new(ProfileRepository::new(prefs.clone())));
    let settings = SettingsCoordinator::new(Arc::new(SettingsRepository::new(prefs)));

    info!("Setting up application state");
    Ok(AppState {
        transactions,
        finances,
        calendar,
        profile,
        settings,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // One route group per navigation surface
    let api_routes = Router::new()
        .route(
            "/transactions",
            get(io::rest::list_transactions).post(io::rest::create_transaction),
        )
        .route("/transactions/reset", post(io::rest::reset_transactions))
        .route(
            "/transactions/:id",
            put(io::rest::update_transaction).delete(io::rest::delete_transaction),
        )
        .route("/summary", get(io::rest::get_summary))
        .route("/calendar/daily-totals", get(io::rest::get_daily_totals))
        .route("/calendar/day/:date", get(io::rest::get_day_detail))
        .route("/calendar/select-date", post(io::rest::select_date))
        .route("/profile", get(io::rest::get_profile).put(io::rest::save_profile))
        .route("/settings", get(io::rest::get_settings))
        .route("/settings/currency", put(io::rest::set_currency))
        .route("/settings/dark-mode/toggle", post(io::rest::toggle_dark_mode));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
