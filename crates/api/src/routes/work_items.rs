//! Route definitions for work items.
//!
//! Mounted at `/work-items` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::work_items;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_work_items (?status, assigned_to)
/// POST   /              -> create_work_item
/// GET    /statuses      -> work_item_statuses
/// GET    /priorities    -> work_item_priorities
/// GET    /{id}          -> get_work_item
/// PUT    /{id}          -> update_work_item
/// DELETE /{id}          -> delete_work_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(work_items::list_work_items).post(work_items::create_work_item),
        )
        .route("/statuses", get(work_items::work_item_statuses))
        .route("/priorities", get(work_items::work_item_priorities))
        .route(
            "/{id}",
            get(work_items::get_work_item)
                .put(work_items::update_work_item)
                .delete(work_items::delete_work_item),
        )
}
