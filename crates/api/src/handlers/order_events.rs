//! Handlers for the order event log: history listing and typed appends.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use orderdesk_core::error::CoreError;
use orderdesk_core::events::EventDetail;
use orderdesk_core::types::DbId;
use orderdesk_db::models::order_event::EventFilter;
use orderdesk_db::repositories::{OrderEventRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fail with 404 unless the order exists. No event row is ever written for
/// a missing order.
async fn require_order(state: &AppState, order_id: DbId) -> AppResult<()> {
    if OrderRepo::exists(&state.pool, order_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Order",
            id: order_id,
        }))
    }
}

/// GET /orders/{id}/history?event_type=&limit=&offset=
///
/// Paginated event log for an order, newest-first.
pub async fn order_history(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(filter): Query<EventFilter>,
) -> AppResult<impl IntoResponse> {
    require_order(&state, id).await?;

    let events = OrderEventRepo::list_for_order(&state.pool, id, &filter).await?;
    Ok(Json(DataResponse { data: events }))
}

/// Request body for `POST /orders/{id}/events/note`.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

/// POST /orders/{id}/events/note
///
/// Append a free-text note to the order's history.
pub async fn add_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NoteRequest>,
) -> AppResult<impl IntoResponse> {
    if input.note.trim().is_empty() {
        return Err(AppError::BadRequest("Note must not be empty".to_string()));
    }
    require_order(&state, id).await?;

    let event = OrderEventRepo::append(
        &state.pool,
        id,
        &EventDetail::Note { note: input.note },
        Some(auth.user_id),
    )
    .await?;

    tracing::info!(user_id = auth.user_id, order_id = id, "Order note added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// Request body for `POST /orders/{id}/events/payment`.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    /// e.g. "deposit", "final", "partial".
    pub payment_type: String,
    /// e.g. "credit_card", "check", "bank_transfer".
    pub payment_method: String,
    pub reference: Option<String>,
}

/// POST /orders/{id}/events/payment
///
/// Record a payment against the order.
pub async fn record_payment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PaymentRequest>,
) -> AppResult<impl IntoResponse> {
    if input.amount <= 0.0 {
        return Err(AppError::BadRequest(
            "Payment amount must be positive".to_string(),
        ));
    }
    require_order(&state, id).await?;

    let event = OrderEventRepo::append(
        &state.pool,
        id,
        &EventDetail::Payment {
            amount: input.amount,
            payment_type: input.payment_type,
            payment_method: input.payment_method,
            reference: input.reference,
        },
        Some(auth.user_id),
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        order_id = id,
        amount = input.amount,
        "Payment recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// Request body for `POST /orders/{id}/events/document`.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub document_type: String,
    pub document_name: String,
    /// e.g. "uploaded", "signed", "sent".
    pub action: String,
    pub document_id: Option<String>,
}

/// POST /orders/{id}/events/document
///
/// Record a document action (upload, signature, send) on the order.
pub async fn record_document(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DocumentRequest>,
) -> AppResult<impl IntoResponse> {
    require_order(&state, id).await?;

    let event = OrderEventRepo::append(
        &state.pool,
        id,
        &EventDetail::Document {
            document_type: input.document_type,
            document_name: input.document_name,
            action: input.action,
            document_id: input.document_id,
        },
        Some(auth.user_id),
    )
    .await?;

    tracing::info!(user_id = auth.user_id, order_id = id, "Document event recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}
