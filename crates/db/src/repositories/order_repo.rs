//! Repository for the `orders` table.

use sqlx::PgPool;

use orderdesk_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use orderdesk_core::types::DbId;

use crate::models::order::{CreateOrder, Order, OrderFilter, UpdateOrder, WorkflowState};

/// Column list for `orders` queries.
const COLUMNS: &str = "id, order_number, workflow_type, customer_id, status, current_stage, \
    workflow_status, completed_statuses, progress_percentage, notes, total_amount, balance_due, \
    deposit_required, deposit_amount, deposit_received, installation_date, created_by, revision, \
    created_at, updated_at";

/// Provides CRUD and workflow-state operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Create a new order with its seeded workflow state, returning the row.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateOrder,
        workflow: &WorkflowState,
    ) -> Result<Order, sqlx::Error> {
        let status = input.status.as_deref().unwrap_or("ACTIVE");
        let query = format!(
            "INSERT INTO orders
                (order_number, workflow_type, customer_id, status, current_stage,
                 workflow_status, completed_statuses, progress_percentage, notes, total_amount,
                 deposit_required, deposit_amount, installation_date, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&input.order_number)
            .bind(&input.workflow_type)
            .bind(input.customer_id)
            .bind(status)
            .bind(&workflow.current_stage)
            .bind(&workflow.workflow_status)
            .bind(&workflow.completed_statuses)
            .bind(workflow.progress_percentage)
            .bind(&input.notes)
            .bind(input.total_amount)
            .bind(input.deposit_required.unwrap_or(false))
            .bind(input.deposit_amount)
            .bind(input.installation_date)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an order by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List orders newest-first with optional status/type/customer filters.
    pub async fn list(pool: &PgPool, filter: &OrderFilter) -> Result<Vec<Order>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR workflow_type = $2)
               AND ($3::bigint IS NULL OR customer_id = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(&filter.status)
            .bind(&filter.workflow_type)
            .bind(filter.customer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List orders for a customer, newest-first.
    pub async fn list_for_customer(
        pool: &PgPool,
        customer_id: DbId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(customer_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update to the non-workflow columns.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = COALESCE($2, status),
                notes = COALESCE($3, notes),
                total_amount = COALESCE($4, total_amount),
                balance_due = COALESCE($5, balance_due),
                deposit_required = COALESCE($6, deposit_required),
                deposit_amount = COALESCE($7, deposit_amount),
                deposit_received = COALESCE($8, deposit_received),
                installation_date = COALESCE($9, installation_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(&input.notes)
            .bind(input.total_amount)
            .bind(input.balance_due)
            .bind(input.deposit_required)
            .bind(input.deposit_amount)
            .bind(input.deposit_received)
            .bind(input.installation_date)
            .fetch_optional(pool)
            .await
    }

    /// Write the workflow columns guarded by the revision the caller read.
    ///
    /// Returns `None` when no row matched -- either the order is gone or a
    /// concurrent transition bumped the revision first. The caller decides
    /// which by re-reading; the write itself never clobbers a newer state.
    pub async fn update_workflow_state(
        pool: &PgPool,
        id: DbId,
        expected_revision: i32,
        state: &WorkflowState,
        lifecycle_status: Option<&str>,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                workflow_status = $3,
                current_stage = $4,
                completed_statuses = $5,
                progress_percentage = $6,
                status = COALESCE($7, status),
                revision = revision + 1,
                updated_at = NOW()
             WHERE id = $1 AND revision = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(expected_revision)
            .bind(&state.workflow_status)
            .bind(&state.current_stage)
            .bind(&state.completed_statuses)
            .bind(state.progress_percentage)
            .bind(lifecycle_status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete: set the lifecycle status to CANCELLED.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = 'CANCELLED', updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an order with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }
}
