//! Route definitions for orders, their workflow transitions, event log,
//! and nested purchase orders / quotes / materials.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{order_events, orders, purchase_orders, quotes, workflow};
use crate::state::AppState;

/// ```text
/// GET  /orders                                 -> list_orders
/// POST /orders                                 -> create_order
/// GET  /orders/order-statuses                  -> workflow::order_statuses
/// GET  /orders/workflow-stages                 -> workflow::workflow_stages
/// GET  /orders/next-status                     -> workflow::probe_next_status
/// GET  /orders/{id}                            -> get_order
/// PUT  /orders/{id}                            -> update_order
/// DELETE /orders/{id}                          -> cancel_order
/// POST /orders/{id}/update-status              -> update_status
/// POST /orders/{id}/complete-and-advance       -> complete_and_advance
/// POST /orders/{id}/set-current-status         -> set_current_status
/// POST /orders/{id}/remove-completed-status    -> remove_completed_status
/// GET  /orders/{id}/history                    -> order_history
/// POST /orders/{id}/events/note                -> add_note
/// POST /orders/{id}/events/payment             -> record_payment
/// POST /orders/{id}/events/document            -> record_document
/// GET/POST /orders/{id}/purchase-orders        -> purchase orders
/// GET/POST /orders/{id}/quotes                 -> quotes
/// GET/POST /orders/{id}/materials              -> materials
/// PUT  /purchase-orders/{id}                   -> update_purchase_order
/// PUT  /quotes/{id}                            -> update_quote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/orders/order-statuses", get(workflow::order_statuses))
        .route("/orders/workflow-stages", get(workflow::workflow_stages))
        .route("/orders/next-status", get(workflow::probe_next_status))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::cancel_order),
        )
        .route("/orders/{id}/update-status", post(orders::update_status))
        .route(
            "/orders/{id}/complete-and-advance",
            post(orders::complete_and_advance),
        )
        .route(
            "/orders/{id}/set-current-status",
            post(orders::set_current_status),
        )
        .route(
            "/orders/{id}/remove-completed-status",
            post(orders::remove_completed_status),
        )
        .route("/orders/{id}/history", get(order_events::order_history))
        .route("/orders/{id}/events/note", post(order_events::add_note))
        .route(
            "/orders/{id}/events/payment",
            post(order_events::record_payment),
        )
        .route(
            "/orders/{id}/events/document",
            post(order_events::record_document),
        )
        .route(
            "/orders/{id}/purchase-orders",
            get(purchase_orders::list_purchase_orders)
                .post(purchase_orders::create_purchase_order),
        )
        .route(
            "/orders/{id}/quotes",
            get(quotes::list_quotes).post(quotes::create_quote),
        )
        .route(
            "/orders/{id}/materials",
            get(orders::list_materials).post(orders::create_material),
        )
        .route(
            "/purchase-orders/{id}",
            put(purchase_orders::update_purchase_order),
        )
        .route("/quotes/{id}", put(quotes::update_quote))
}
