//! # REST API for the Profile Screen

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::Profile;

/// Current user profile
pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    info!("GET /api/profile");
    Json(state.profile.profile())
}

/// Save the whole profile
pub async fn save_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> impl IntoResponse {
    info!("PUT /api/profile - request: {:?}", profile);

    match state.profile.save(profile) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to save profile: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving profile").into_response()
        }
    }
}
