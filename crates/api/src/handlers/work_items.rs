//! Handlers for the `/work-items` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use orderdesk_core::error::CoreError;
use orderdesk_core::types::DbId;
use orderdesk_core::work_items::{
    validate_work_item_priority, validate_work_item_status, VALID_WORK_ITEM_PRIORITIES,
    VALID_WORK_ITEM_STATUSES,
};
use orderdesk_db::models::work_item::{CreateWorkItem, UpdateWorkItem, WorkItemFilter};
use orderdesk_db::repositories::{UserRepo, WorkItemRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /work-items
pub async fn create_work_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkItem>,
) -> AppResult<impl IntoResponse> {
    if input.description.trim().is_empty() {
        return Err(AppError::BadRequest("Description is required".to_string()));
    }
    validate_work_item_status(&input.status)?;
    validate_work_item_priority(&input.priority)?;

    // Stamp the creator's username rather than trusting the body.
    let entered_by = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .map(|user| user.username)
        .unwrap_or_else(|| "system".to_string());

    let work_item = WorkItemRepo::create(&state.pool, &entered_by, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        work_item_id = work_item.id,
        status = %work_item.status,
        "Work item created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: work_item })))
}

/// GET /work-items?status=&assigned_to=&limit=&offset=
pub async fn list_work_items(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<WorkItemFilter>,
) -> AppResult<impl IntoResponse> {
    let work_items = WorkItemRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: work_items }))
}

/// GET /work-items/{id}
pub async fn get_work_item(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let work_item = WorkItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "WorkItem",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: work_item }))
}

/// PUT /work-items/{id}
pub async fn update_work_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        validate_work_item_status(status)?;
    }
    if let Some(ref priority) = input.priority {
        validate_work_item_priority(priority)?;
    }

    let work_item = WorkItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "WorkItem",
                id,
            })
        })?;

    tracing::info!(user_id = auth.user_id, work_item_id = id, "Work item updated");

    Ok(Json(DataResponse { data: work_item }))
}

/// DELETE /work-items/{id}
pub async fn delete_work_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorkItemRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "WorkItem",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, work_item_id = id, "Work item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /work-items/statuses
pub async fn work_item_statuses(_auth: AuthUser) -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: VALID_WORK_ITEM_STATUSES,
    })
}

/// GET /work-items/priorities
pub async fn work_item_priorities(
    _auth: AuthUser,
) -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: VALID_WORK_ITEM_PRIORITIES,
    })
}
