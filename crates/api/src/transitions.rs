//! The order workflow transition service.
//!
//! Every state transition follows the same shape: read the order, validate
//! the target status against the workflow definition table, compute the new
//! workflow columns, perform a single revision-guarded write, then append
//! the describing event(s).
//!
//! The guarded write closes the read-modify-write race on the order row: a
//! transition that loses to a concurrent writer gets 409 instead of
//! silently dropping the other writer's completed-status entry.
//!
//! Event appends are best-effort. A failed insert is logged and swallowed;
//! the primary state mutation has already succeeded and is returned.

use orderdesk_core::error::CoreError;
use orderdesk_core::events::EventDetail;
use orderdesk_core::order::ORDER_STATUS_COMPLETED;
use orderdesk_core::types::DbId;
use orderdesk_core::workflow::{
    self, all_statuses, next_status, progress_percentage, stage_of_status, WorkflowType,
};

use orderdesk_db::models::order::{Order, WorkflowState};
use orderdesk_db::repositories::{OrderEventRepo, OrderRepo};
use orderdesk_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load an order or fail with 404.
pub async fn load_order(pool: &DbPool, order_id: DbId) -> AppResult<Order> {
    OrderRepo::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            })
        })
}

/// Parse the workflow type persisted on an order row.
///
/// A row with an unknown type is data corruption, not caller error.
fn order_workflow_type(order: &Order) -> AppResult<WorkflowType> {
    WorkflowType::parse(&order.workflow_type).map_err(|_| {
        AppError::Core(CoreError::Internal(format!(
            "Order {} has unknown workflow type '{}'",
            order.id, order.workflow_type
        )))
    })
}

/// Append an event, logging and swallowing any failure.
pub async fn record_event(
    pool: &DbPool,
    order_id: DbId,
    detail: &EventDetail,
    created_by: Option<DbId>,
) {
    if let Err(error) = OrderEventRepo::append(pool, order_id, detail, created_by).await {
        tracing::warn!(order_id, error = %error, "Failed to record order event");
    }
}

/// Write the workflow columns under the revision guard.
///
/// Maps a missed guard to 409 (concurrent writer) or 404 (row gone).
async fn guarded_write(
    pool: &DbPool,
    order: &Order,
    state: &WorkflowState,
    lifecycle_status: Option<&str>,
) -> AppResult<Order> {
    match OrderRepo::update_workflow_state(pool, order.id, order.revision, state, lifecycle_status)
        .await?
    {
        Some(updated) => Ok(updated),
        None => {
            if OrderRepo::exists(pool, order.id).await? {
                Err(AppError::Core(CoreError::Conflict(format!(
                    "Order {} was modified concurrently; retry the transition",
                    order.id
                ))))
            } else {
                Err(AppError::Core(CoreError::NotFound {
                    entity: "Order",
                    id: order.id,
                }))
            }
        }
    }
}

/// Mark a status as completed without advancing past it.
///
/// Idempotent in membership: re-completing an already-completed status
/// leaves the set unchanged. The order's workflow position becomes the
/// completed status itself; reaching the final status of the sequence also
/// completes the order's lifecycle.
pub async fn complete_status(
    pool: &DbPool,
    order_id: DbId,
    user_id: DbId,
    status_id: &str,
    notes: Option<String>,
) -> AppResult<Order> {
    let order = load_order(pool, order_id).await?;
    let workflow_type = order_workflow_type(&order)?;
    workflow::validate_status(workflow_type, status_id)?;

    let mut completed = order.completed_statuses.clone();
    workflow::push_completed(&mut completed, status_id);

    let total = all_statuses(workflow_type).len();
    let is_terminal = next_status(workflow_type, status_id)?.is_none();

    let state = WorkflowState {
        workflow_status: Some(status_id.to_string()),
        current_stage: stage_of_status(workflow_type, status_id).map(|s| s.id.to_string()),
        progress_percentage: progress_percentage(completed.len(), total),
        completed_statuses: completed,
    };
    let lifecycle = is_terminal.then_some(ORDER_STATUS_COMPLETED);

    let updated = guarded_write(pool, &order, &state, lifecycle).await?;

    record_event(
        pool,
        order_id,
        &EventDetail::StatusCompletion {
            status: status_id.to_string(),
            notes,
        },
        Some(user_id),
    )
    .await;

    tracing::info!(
        order_id,
        user_id,
        status = status_id,
        progress = updated.progress_percentage,
        "Order status completed"
    );

    Ok(updated)
}

/// Mark a status as completed and advance to the one that follows it.
///
/// Appends a completion event and, when a next status exists, a second
/// stage-change event for the advance. At the end of the sequence this
/// behaves exactly like [`complete_status`].
pub async fn complete_and_advance(
    pool: &DbPool,
    order_id: DbId,
    user_id: DbId,
    status_id: &str,
    notes: Option<String>,
) -> AppResult<Order> {
    let order = load_order(pool, order_id).await?;
    let workflow_type = order_workflow_type(&order)?;
    workflow::validate_status(workflow_type, status_id)?;

    let mut completed = order.completed_statuses.clone();
    workflow::push_completed(&mut completed, status_id);

    let total = all_statuses(workflow_type).len();
    let following = next_status(workflow_type, status_id)?;
    let landing = following.unwrap_or(status_id);

    let state = WorkflowState {
        workflow_status: Some(landing.to_string()),
        current_stage: stage_of_status(workflow_type, landing).map(|s| s.id.to_string()),
        progress_percentage: progress_percentage(completed.len(), total),
        completed_statuses: completed,
    };
    let lifecycle = following.is_none().then_some(ORDER_STATUS_COMPLETED);

    let updated = guarded_write(pool, &order, &state, lifecycle).await?;

    record_event(
        pool,
        order_id,
        &EventDetail::StatusCompletion {
            status: status_id.to_string(),
            notes,
        },
        Some(user_id),
    )
    .await;

    if let Some(next) = following {
        record_event(
            pool,
            order_id,
            &EventDetail::StageChange {
                previous_status: Some(status_id.to_string()),
                new_status: next.to_string(),
                notes: Some(format!("Advanced from {status_id}")),
            },
            Some(user_id),
        )
        .await;
    }

    tracing::info!(
        order_id,
        user_id,
        status = status_id,
        advanced_to = following.unwrap_or(status_id),
        "Order status completed and advanced"
    );

    Ok(updated)
}

/// Set the workflow position directly, bypassing sequential advancement.
///
/// The completed set and progress are untouched; only the position (and its
/// cached stage) move.
pub async fn set_current_status(
    pool: &DbPool,
    order_id: DbId,
    user_id: DbId,
    status_id: &str,
    notes: Option<String>,
) -> AppResult<Order> {
    let order = load_order(pool, order_id).await?;
    let workflow_type = order_workflow_type(&order)?;
    workflow::validate_status(workflow_type, status_id)?;

    let state = WorkflowState {
        workflow_status: Some(status_id.to_string()),
        current_stage: stage_of_status(workflow_type, status_id).map(|s| s.id.to_string()),
        completed_statuses: order.completed_statuses.clone(),
        progress_percentage: order.progress_percentage,
    };

    let previous = order.workflow_status.clone();
    let updated = guarded_write(pool, &order, &state, None).await?;

    record_event(
        pool,
        order_id,
        &EventDetail::StageChange {
            previous_status: previous,
            new_status: status_id.to_string(),
            notes,
        },
        Some(user_id),
    )
    .await;

    tracing::info!(order_id, user_id, status = status_id, "Order status set directly");

    Ok(updated)
}

/// Remove a status from the completed set and recompute progress.
///
/// Removing a status that was never completed is a successful no-op: the
/// unchanged order is returned and no event is recorded.
pub async fn remove_completed_status(
    pool: &DbPool,
    order_id: DbId,
    user_id: DbId,
    status_id: &str,
    notes: Option<String>,
) -> AppResult<Order> {
    let order = load_order(pool, order_id).await?;
    let workflow_type = order_workflow_type(&order)?;
    workflow::validate_status(workflow_type, status_id)?;

    let mut completed = order.completed_statuses.clone();
    if !workflow::remove_completed(&mut completed, status_id) {
        return Ok(order);
    }

    let total = all_statuses(workflow_type).len();
    let state = WorkflowState {
        workflow_status: order.workflow_status.clone(),
        current_stage: order.current_stage.clone(),
        progress_percentage: progress_percentage(completed.len(), total),
        completed_statuses: completed,
    };

    let updated = guarded_write(pool, &order, &state, None).await?;

    record_event(
        pool,
        order_id,
        &EventDetail::StatusRemoved {
            status: status_id.to_string(),
            notes,
        },
        Some(user_id),
    )
    .await;

    tracing::info!(order_id, user_id, status = status_id, "Completed status removed");

    Ok(updated)
}
