//! # REST API for Transactions
//!
//! Endpoints for listing, creating, updating and deleting transactions,
//! plus the irreversible "reset balance" action.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::FinancesError;
use crate::AppState;
use shared::{CreateTransactionRequest, TransactionCategory, TransactionType};

// Query parameters for the transaction listing API
#[derive(Debug, Deserialize)]
pub struct TransactionListQuery {
    /// Filter by transaction type tag ("income" / "expense")
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Filter by category tag (e.g. "daily_expense")
    pub category: Option<String>,
}

/// List transactions, optionally filtered by type or category
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let result = match (&query.transaction_type, &query.category) {
        (Some(tag), _) => match TransactionType::from_tag(tag) {
            Some(transaction_type) => state.transactions.list_by_type(transaction_type).await,
            None => {
                return (StatusCode::BAD_REQUEST, format!("unknown transaction type: {tag}"))
                    .into_response()
            }
        },
        (None, Some(tag)) => match TransactionCategory::from_tag(tag) {
            Some(category) => state.transactions.list_by_category(category).await,
            None => {
                return (StatusCode::BAD_REQUEST, format!("unknown category: {tag}"))
                    .into_response()
            }
        },
        (None, None) => Ok(state.transactions.current()),
    };

    match result {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => {
            error!("Failed to list transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing transactions").into_response()
        }
    }
}

/// Create a new transaction
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    match state.finances.add_transaction(request).await {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(FinancesError::InvalidTransaction(message)) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(e) => {
            error!("Failed to create transaction: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating transaction").into_response()
        }
    }
}

/// Replace an existing transaction
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    info!("PUT /api/transactions/{} - request: {:?}", id, request);

    match state.finances.update_transaction(id, request).await {
        Ok(transaction) => Json(transaction).into_response(),
        Err(FinancesError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, format!("transaction {id} not found")).into_response()
        }
        Err(FinancesError::InvalidTransaction(message)) => {
            (StatusCode::BAD_REQUEST, message).into_response()
        }
        Err(e) => {
            error!("Failed to update transaction {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error updating transaction").into_response()
        }
    }
}

/// Delete a single transaction; deleting an absent one is a no-op
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", id);

    match state.finances.delete_transaction(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete transaction {}: {}", id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error deleting transaction").into_response()
        }
    }
}

/// Clear every transaction ("reset balance"). Irreversible
pub async fn reset_transactions(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/transactions/reset");

    match state.finances.reset_balance().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to reset transactions: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error resetting transactions").into_response()
        }
    }
}
