//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use orderdesk_core::error::CoreError;
use orderdesk_core::events::EventDetail;
use orderdesk_core::tasks::{
    validate_task_priority, validate_task_status, VALID_TASK_PRIORITIES, VALID_TASK_STATUSES,
};
use orderdesk_core::types::DbId;
use orderdesk_db::models::task::{CreateTask, TaskFilter, UpdateTask};
use orderdesk_db::repositories::{OrderRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::transitions;

/// POST /tasks
///
/// Create a task. Linking a task to an order records a task event in that
/// order's history.
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("Task title is required".to_string()));
    }
    validate_task_status(&input.status)?;
    validate_task_priority(&input.priority)?;

    if let Some(order_id) = input.order_id {
        if !OrderRepo::exists(&state.pool, order_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Order",
                id: order_id,
            }));
        }
    }

    let task = TaskRepo::create(&state.pool, auth.user_id, &input).await?;

    if let Some(order_id) = task.order_id {
        transitions::record_event(
            &state.pool,
            order_id,
            &EventDetail::Task {
                task_id: task.id,
                title: task.title.clone(),
            },
            Some(auth.user_id),
        )
        .await;
    }

    tracing::info!(
        user_id = auth.user_id,
        task_id = task.id,
        title = %task.title,
        "Task created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /tasks?status=&priority=&assigned_to=&order_id=&limit=&offset=
pub async fn list_tasks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<impl IntoResponse> {
    let tasks = TaskRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /tasks/{id}
pub async fn get_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    Ok(Json(DataResponse { data: task }))
}

/// PUT /tasks/{id}
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        validate_task_status(status)?;
    }
    if let Some(ref priority) = input.priority {
        validate_task_priority(priority)?;
    }

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(user_id = auth.user_id, task_id = id, "Task updated");

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    tracing::info!(user_id = auth.user_id, task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /tasks/statuses
pub async fn task_statuses(_auth: AuthUser) -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: VALID_TASK_STATUSES,
    })
}

/// GET /tasks/priorities
pub async fn task_priorities(_auth: AuthUser) -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: VALID_TASK_PRIORITIES,
    })
}
