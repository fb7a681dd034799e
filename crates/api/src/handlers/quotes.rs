//! Handlers for quotes nested under an order.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use orderdesk_core::error::CoreError;
use orderdesk_core::events::EventDetail;
use orderdesk_core::types::DbId;
use orderdesk_db::models::quote::{CreateQuote, UpdateQuote, VALID_QUOTE_STATUSES};
use orderdesk_db::repositories::QuoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::transitions;

/// POST /orders/{id}/quotes
///
/// Create a quote for an order.
pub async fn create_quote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<CreateQuote>,
) -> AppResult<impl IntoResponse> {
    if input.quote_number.trim().is_empty() {
        return Err(AppError::BadRequest("Quote number is required".to_string()));
    }

    transitions::load_order(&state.pool, order_id).await?;

    let quote = QuoteRepo::create(&state.pool, order_id, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        order_id,
        quote_id = quote.id,
        quote_number = %quote.quote_number,
        "Quote created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: quote })))
}

/// GET /orders/{id}/quotes
///
/// List quotes for an order, newest-first.
pub async fn list_quotes(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transitions::load_order(&state.pool, order_id).await?;

    let quotes = QuoteRepo::list_for_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse { data: quotes }))
}

/// PUT /quotes/{id}
///
/// Partial update of a quote. Moving a quote to ACCEPTED records an event
/// on the owning order.
pub async fn update_quote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuote>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        if !VALID_QUOTE_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid quote status '{status}'. Must be one of: {}",
                VALID_QUOTE_STATUSES.join(", ")
            ))));
        }
    }

    let previous = QuoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Quote", id }))?;

    let quote = QuoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Quote", id }))?;

    if quote.status == "ACCEPTED" && previous.status != "ACCEPTED" {
        transitions::record_event(
            &state.pool,
            quote.order_id,
            &EventDetail::QuoteAccepted {
                quote_number: quote.quote_number.clone(),
            },
            Some(auth.user_id),
        )
        .await;
    }

    tracing::info!(user_id = auth.user_id, quote_id = id, status = %quote.status, "Quote updated");

    Ok(Json(DataResponse { data: quote }))
}
