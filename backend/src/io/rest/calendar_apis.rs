//! # REST API for the Calendar View
//!
//! Daily totals, per-date detail and date selection. All derived reads:
//! they never fail, they can only degrade to empty results.

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::NaiveDate;
use tracing::info;

use crate::AppState;
use shared::{DailyTotalsResponse, DayDetail, SelectDateRequest};

/// Signed totals per calendar day; days without transactions are absent
pub async fn get_daily_totals(State(state): State<AppState>) -> Json<DailyTotalsResponse> {
    info!("GET /api/calendar/daily-totals");
    Json(DailyTotalsResponse {
        totals: state.calendar.current_daily_totals(),
    })
}

/// Detail view for one calendar date
pub async fn get_day_detail(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Json<DayDetail> {
    info!("GET /api/calendar/day/{}", date);
    Json(state.calendar.day_detail(date))
}

/// Select a calendar date and return its detail view
pub async fn select_date(
    State(state): State<AppState>,
    Json(request): Json<SelectDateRequest>,
) -> Json<DayDetail> {
    info!("POST /api/calendar/select-date - {}", request.date);
    state.calendar.select_date(request.date);
    Json(state.calendar.day_detail(request.date))
}
