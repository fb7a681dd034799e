//! Handlers for the `/orders` resource: CRUD plus workflow transitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use orderdesk_core::error::CoreError;
use orderdesk_core::events::EventDetail;
use orderdesk_core::order::{validate_order_number, validate_order_status};
use orderdesk_core::types::DbId;
use orderdesk_core::workflow::{
    self, all_statuses, first_status, progress_percentage, stage_of_status, WorkflowType,
};
use orderdesk_db::models::material::{CreateMaterial, Material};
use orderdesk_db::models::order::{CreateOrder, Order, OrderFilter, UpdateOrder, WorkflowState};
use orderdesk_db::models::purchase_order::PurchaseOrder;
use orderdesk_db::models::quote::Quote;
use orderdesk_db::repositories::{
    CustomerRepo, MaterialRepo, OrderRepo, PurchaseOrderRepo, QuoteRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::transitions;

/// Request body for the transition endpoints that complete a status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub new_status: String,
    pub notes: Option<String>,
}

/// Request body for set-current-status / remove-completed-status.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// An order with its related records denormalized for detail views.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub quotes: Vec<Quote>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub materials: Vec<Material>,
}

/// POST /orders
///
/// Create a new order. The starting workflow status defaults to the first
/// status of the order's workflow type; starting at the first status seeds
/// the completed set with it.
pub async fn create_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateOrder>,
) -> AppResult<impl IntoResponse> {
    validate_order_number(&input.order_number)?;
    let workflow_type = WorkflowType::parse(&input.workflow_type)?;

    if let Some(ref status) = input.status {
        validate_order_status(status)?;
    }

    if !CustomerRepo::exists(&state.pool, input.customer_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.customer_id,
        }));
    }

    let starting_status = match input.workflow_status.as_deref() {
        Some(status) => {
            workflow::validate_status(workflow_type, status)?;
            status
        }
        None => first_status(workflow_type).id,
    };

    // Beginning at the very first status counts it as completed already.
    let completed: Vec<String> = if starting_status == first_status(workflow_type).id {
        vec![starting_status.to_string()]
    } else {
        Vec::new()
    };

    let seed = WorkflowState {
        workflow_status: Some(starting_status.to_string()),
        current_stage: stage_of_status(workflow_type, starting_status).map(|s| s.id.to_string()),
        progress_percentage: progress_percentage(
            completed.len(),
            all_statuses(workflow_type).len(),
        ),
        completed_statuses: completed,
    };

    let order = OrderRepo::create(&state.pool, auth.user_id, &input, &seed).await?;

    transitions::record_event(
        &state.pool,
        order.id,
        &EventDetail::OrderCreated {
            order_number: order.order_number.clone(),
            initial_status: order.workflow_status.clone(),
        },
        Some(auth.user_id),
    )
    .await;

    tracing::info!(
        user_id = auth.user_id,
        order_id = order.id,
        order_number = %order.order_number,
        workflow_type = %order.workflow_type,
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /orders?status=&workflow_type=&customer_id=&limit=&offset=
///
/// List orders newest-first with optional filters.
pub async fn list_orders(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref workflow_type) = filter.workflow_type {
        WorkflowType::parse(workflow_type)?;
    }
    let orders = OrderRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /orders/{id}
///
/// Get an order with its quotes, purchase orders, and materials.
pub async fn get_order(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = transitions::load_order(&state.pool, id).await?;

    let quotes = QuoteRepo::list_for_order(&state.pool, id).await?;
    let purchase_orders = PurchaseOrderRepo::list_for_order(&state.pool, id).await?;
    let materials = MaterialRepo::list_for_order(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: OrderDetail {
            order,
            quotes,
            purchase_orders,
            materials,
        },
    }))
}

/// PUT /orders/{id}
///
/// Partial update of the non-workflow fields. Workflow position only moves
/// through the transition endpoints.
pub async fn update_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = input.status {
        validate_order_status(status)?;
    }

    let order = OrderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    tracing::info!(user_id = auth.user_id, order_id = id, "Order updated");

    Ok(Json(DataResponse { data: order }))
}

/// DELETE /orders/{id}
///
/// Cancel an order. The row is kept; only the lifecycle status changes.
pub async fn cancel_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    transitions::record_event(
        &state.pool,
        id,
        &EventDetail::OrderCancelled { reason: None },
        Some(auth.user_id),
    )
    .await;

    tracing::info!(user_id = auth.user_id, order_id = id, "Order cancelled");

    Ok(Json(DataResponse { data: order }))
}

/// POST /orders/{id}/update-status
///
/// Complete a workflow status without advancing past it.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdateRequest>,
) -> AppResult<impl IntoResponse> {
    let order = transitions::complete_status(
        &state.pool,
        id,
        auth.user_id,
        &input.new_status,
        input.notes,
    )
    .await?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /orders/{id}/complete-and-advance
///
/// Complete a workflow status and advance to the one that follows it.
pub async fn complete_and_advance(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<impl IntoResponse> {
    let order = transitions::complete_and_advance(
        &state.pool,
        id,
        auth.user_id,
        &input.status,
        input.notes,
    )
    .await?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /orders/{id}/set-current-status
///
/// Set the workflow position directly, bypassing sequential advancement.
pub async fn set_current_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<impl IntoResponse> {
    let order = transitions::set_current_status(
        &state.pool,
        id,
        auth.user_id,
        &input.status,
        input.notes,
    )
    .await?;
    Ok(Json(DataResponse { data: order }))
}

/// POST /orders/{id}/materials
///
/// Add a material line item to an order.
pub async fn create_material(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
    Json(input): Json<CreateMaterial>,
) -> AppResult<impl IntoResponse> {
    if input.item_name.trim().is_empty() {
        return Err(AppError::BadRequest("Item name is required".to_string()));
    }
    if input.quantity <= 0.0 {
        return Err(AppError::BadRequest(
            "Quantity must be positive".to_string(),
        ));
    }

    transitions::load_order(&state.pool, order_id).await?;

    let material = MaterialRepo::create(&state.pool, order_id, &input).await?;

    transitions::record_event(
        &state.pool,
        order_id,
        &EventDetail::MaterialAdded {
            item_name: material.item_name.clone(),
            quantity: material.quantity,
            unit: material.unit.clone(),
        },
        Some(auth.user_id),
    )
    .await;

    tracing::info!(
        user_id = auth.user_id,
        order_id,
        material_id = material.id,
        item = %material.item_name,
        "Material added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: material })))
}

/// GET /orders/{id}/materials
///
/// List materials for an order, newest-first.
pub async fn list_materials(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(order_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    transitions::load_order(&state.pool, order_id).await?;

    let materials = MaterialRepo::list_for_order(&state.pool, order_id).await?;
    Ok(Json(DataResponse { data: materials }))
}

/// POST /orders/{id}/remove-completed-status
///
/// Undo a status completion. Removing a never-completed status is a no-op.
pub async fn remove_completed_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<impl IntoResponse> {
    let order = transitions::remove_completed_status(
        &state.pool,
        id,
        auth.user_id,
        &input.status,
        input.notes,
    )
    .await?;
    Ok(Json(DataResponse { data: order }))
}
