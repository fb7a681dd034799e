//! Handlers for the `/customers` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use orderdesk_core::customers::validate_customer_type;
use orderdesk_core::error::CoreError;
use orderdesk_core::types::DbId;
use orderdesk_db::models::customer::{CreateCustomer, UpdateCustomer};
use orderdesk_db::repositories::{CustomerRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing customers.
#[derive(Debug, Deserialize)]
pub struct CustomerListParams {
    pub customer_type: Option<String>,
    /// Matches company name, contact last name, or email.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /customers?customer_type=&search=&limit=&offset=
pub async fn list_customers(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref customer_type) = params.customer_type {
        validate_customer_type(customer_type)?;
    }

    let customers = CustomerRepo::list(
        &state.pool,
        params.customer_type.as_deref(),
        params.search.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;

    Ok(Json(DataResponse { data: customers }))
}

/// GET /customers/{id}
pub async fn get_customer(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Customer",
                id,
            })
        })?;

    Ok(Json(DataResponse { data: customer }))
}

/// POST /customers
pub async fn create_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCustomer>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_customer_type(&input.customer_type)?;

    let customer = CustomerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        customer_id = customer.id,
        company = %customer.company_name,
        "Customer created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: customer })))
}

/// PUT /customers/{id}
pub async fn update_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCustomer>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if let Some(ref customer_type) = input.customer_type {
        validate_customer_type(customer_type)?;
    }

    let customer = CustomerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Customer",
                id,
            })
        })?;

    tracing::info!(user_id = auth.user_id, customer_id = id, "Customer updated");

    Ok(Json(DataResponse { data: customer }))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CustomerRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, customer_id = id, "Customer deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /customers/{id}/orders
///
/// All orders for a customer, newest-first.
pub async fn list_customer_orders(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CustomerRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id,
        }));
    }

    let orders = OrderRepo::list_for_customer(&state.pool, id).await?;
    Ok(Json(DataResponse { data: orders }))
}
