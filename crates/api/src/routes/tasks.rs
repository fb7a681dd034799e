//! Route definitions for tasks.
//!
//! Mounted at `/tasks` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_tasks (?status, priority, assigned_to, order_id)
/// POST   /              -> create_task
/// GET    /statuses      -> task_statuses
/// GET    /priorities    -> task_priorities
/// GET    /{id}          -> get_task
/// PUT    /{id}          -> update_task
/// DELETE /{id}          -> delete_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/statuses", get(tasks::task_statuses))
        .route("/priorities", get(tasks::task_priorities))
        .route(
            "/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
}
