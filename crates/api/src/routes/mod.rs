//! Route tree assembly.

pub mod auth;
pub mod customers;
pub mod health;
pub mod orders;
pub mod tasks;
pub mod work_items;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                  login (public)
/// /auth/me                                     current user
///
/// /customers                                   list, create
/// /customers/{id}                              get, update, delete
/// /customers/{id}/orders                       orders for a customer
///
/// /orders                                      list, create
/// /orders/order-statuses                       flattened status list (?workflow_type)
/// /orders/workflow-stages                      nested stage structure (?workflow_type)
/// /orders/next-status                          advancer probe (?workflow_type, current_status)
/// /orders/{id}                                 get, update, cancel
/// /orders/{id}/update-status                   complete a status (POST)
/// /orders/{id}/complete-and-advance            complete + advance (POST)
/// /orders/{id}/set-current-status              set position directly (POST)
/// /orders/{id}/remove-completed-status         undo a completion (POST)
/// /orders/{id}/history                         event log (?event_type, limit, offset)
/// /orders/{id}/events/note                     append note (POST)
/// /orders/{id}/events/payment                  append payment (POST)
/// /orders/{id}/events/document                 append document action (POST)
/// /orders/{id}/purchase-orders                 list, create
/// /orders/{id}/quotes                          list, create
/// /orders/{id}/materials                       list, create
/// /purchase-orders/{id}                        update
/// /quotes/{id}                                 update
///
/// /tasks                                       list, create
/// /tasks/statuses                              valid statuses
/// /tasks/priorities                            valid priorities
/// /tasks/{id}                                  get, update, delete
///
/// /work-items                                  list, create
/// /work-items/statuses                         valid statuses
/// /work-items/priorities                       valid priorities
/// /work-items/{id}                             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/customers", customers::router())
        .merge(orders::router())
        .nest("/tasks", tasks::router())
        .nest("/work-items", work_items::router())
}
