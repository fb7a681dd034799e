//! Route definitions for customers.
//!
//! Mounted at `/customers` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_customers (?customer_type, search, limit, offset)
/// POST   /              -> create_customer
/// GET    /{id}          -> get_customer
/// PUT    /{id}          -> update_customer
/// DELETE /{id}          -> delete_customer
/// GET    /{id}/orders   -> list_customer_orders
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/{id}/orders", get(customers::list_customer_orders))
}
