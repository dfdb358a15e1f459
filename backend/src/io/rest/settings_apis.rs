//! # REST API for the Settings Screen

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;
use shared::{Currency, Settings};

#[derive(Debug, Deserialize)]
pub struct SetCurrencyRequest {
    pub currency: Currency,
}

#[derive(Debug, Serialize)]
pub struct DarkModeResponse {
    pub dark_mode: bool,
}

/// Current settings
pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    info!("GET /api/settings");
    Json(state.settings.settings())
}

/// Persist a new display currency
pub async fn set_currency(
    State(state): State<AppState>,
    Json(request): Json<SetCurrencyRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/currency - {:?}", request.currency);

    match state.settings.save_currency(request.currency) {
        Ok(()) => Json(state.settings.settings()).into_response(),
        Err(e) => {
            error!("Failed to save currency: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving currency").into_response()
        }
    }
}

/// Flip the dark-mode flag and return the new value
pub async fn toggle_dark_mode(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/settings/dark-mode/toggle");

    match state.settings.toggle_dark_mode() {
        Ok(dark_mode) => Json(DarkModeResponse { dark_mode }).into_response(),
        Err(e) => {
            error!("Failed to toggle dark mode: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error toggling dark mode").into_response()
        }
    }
}
