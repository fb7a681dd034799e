//! Handlers for purchase orders nested under an order.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use orderdesk_core::error::CoreError;
use orderdesk_core::events::EventDetail;
use orderdesk_core::types::DbId;
use orderdesk_core::workflow::{all_statuses, WorkflowType};
use orderdesk_db::models::purchase_order::{CreatePurchaseOrder, UpdatePurchaseOrder};
use orderdesk_db::repositories::PurchaseOrderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::transitions;

/// POST /orders/{id}/purchase-orders
///
/// Create a purchase order. An order that has not yet reached PO_CREATED is
/// pulled forward to it; that nudge and the event append are best-effort
/// and never fail the create.
pub async fn create_purchase_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<CreatePurchaseOrder>,
) -> AppResult<impl IntoResponse> {
    if input.po_number.trim().is_empty() {
        return Err(AppError::BadRequest("PO number is required".to_string()));
    }

    let order = transitions::load_order(&state.pool, order_id).await?;

    let purchase_order =
        PurchaseOrderRepo::create(&state.pool, order_id, auth.user_id, &input).await?;

    transitions::record_event(
        &state.pool,
        order_id,
        &EventDetail::PurchaseOrderCreated {
            po_number: purchase_order.po_number.clone(),
            supplier_name: purchase_order.supplier_name.clone(),
        },
        Some(auth.user_id),
    )
    .await;

    // Pull the order forward to PO_CREATED when it is still earlier in the
    // sequence.
    if order_sits_before(&order.workflow_type, order.workflow_status.as_deref(), "PO_CREATED") {
        let notes = format!(
            "Automatically advanced due to PO creation: {}",
            purchase_order.po_number
        );
        if let Err(error) = transitions::complete_status(
            &state.pool,
            order_id,
            auth.user_id,
            "PO_CREATED",
            Some(notes),
        )
        .await
        {
            tracing::warn!(order_id, error = %error, "Auto-advance after PO creation failed");
        }
    }

    tracing::info!(
        user_id = auth.user_id,
        order_id,
        po_id = purchase_order.id,
        po_number = %purchase_order.po_number,
        "Purchase order created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: purchase_order,
        }),
    ))
}

/// Whether the order's workflow position is strictly before `target` in its
/// flattened sequence. Unknown types or positions count as "not before".
fn order_sits_before(workflow_type: &str, current: Option<&str>, target: &str) -> bool {
    let Ok(workflow_type) = WorkflowType::parse(workflow_type) else {
        return false;
    };
    let sequence = all_statuses(workflow_type);
    let Some(target_index) = sequence.iter().position(|s| s.id == target) else {
        return false;
    };
    match current {
        None => true,
        Some(current) => sequence
            .iter()
            .position(|s| s.id == current)
            .is_some_and(|current_index| current_index < target_index),
    }
}

/// GET /orders/{id}/purchase-orders
///
/// List purchase orders for an order, newest-first.
pub async fn list_purchase_orders(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transitions::load_order(&state.pool, order_id).await?;

    let purchase_orders = PurchaseOrderRepo::list_for_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse {
        data: purchase_orders,
    }))
}

/// PUT /purchase-orders/{id}
///
/// Partial update of a purchase order.
pub async fn update_purchase_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePurchaseOrder>,
) -> AppResult<impl IntoResponse> {
    let purchase_order = PurchaseOrderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "PurchaseOrder",
                id,
            })
        })?;

    tracing::info!(user_id = auth.user_id, po_id = id, "Purchase order updated");

    Ok(Json(DataResponse {
        data: purchase_order,
    }))
}

#[cfg(test)]
mod tests {
    use super::order_sits_before;

    #[test]
    fn test_order_sits_before() {
        // NEW_LEAD precedes PO_CREATED in both workflows.
        assert!(order_sits_before("MATERIALS_ONLY", Some("NEW_LEAD"), "PO_CREATED"));
        assert!(order_sits_before(
            "MATERIALS_AND_INSTALLATION",
            Some("QUOTE_ACCEPTED"),
            "PO_CREATED"
        ));
        // At or past the target.
        assert!(!order_sits_before("MATERIALS_ONLY", Some("PO_CREATED"), "PO_CREATED"));
        assert!(!order_sits_before("MATERIALS_ONLY", Some("DELIVERED"), "PO_CREATED"));
        // No position yet counts as before.
        assert!(order_sits_before("MATERIALS_ONLY", None, "PO_CREATED"));
        // Garbage inputs never advance anything.
        assert!(!order_sits_before("NOT_A_TYPE", Some("NEW_LEAD"), "PO_CREATED"));
        assert!(!order_sits_before("MATERIALS_ONLY", Some("bogus"), "PO_CREATED"));
    }
}
