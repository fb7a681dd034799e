//! Repository for the `work_items` table.

use sqlx::PgPool;

use orderdesk_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use orderdesk_core::types::DbId;

use crate::models::work_item::{CreateWorkItem, UpdateWorkItem, WorkItem, WorkItemFilter};

/// Column list for `work_items` queries.
const COLUMNS: &str = "id, description, status, priority, assigned_to, entered_by, \
    last_action, next_action, notes, due_date, order_id, created_at, updated_at";

/// Provides CRUD operations for work items.
pub struct WorkItemRepo;

impl WorkItemRepo {
    /// Create a new work item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        entered_by: &str,
        input: &CreateWorkItem,
    ) -> Result<WorkItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_items
                (description, status, priority, assigned_to, entered_by, next_action,
                 notes, due_date, order_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.assigned_to)
            .bind(entered_by)
            .bind(&input.next_action)
            .bind(&input.notes)
            .bind(input.due_date)
            .bind(input.order_id)
            .fetch_one(pool)
            .await
    }

    /// Find a work item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_items WHERE id = $1");
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List work items with optional filters, newest-first.
    pub async fn list(
        pool: &PgPool,
        filter: &WorkItemFilter,
    ) -> Result<Vec<WorkItem>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM work_items
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR assigned_to = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(&filter.status)
            .bind(&filter.assigned_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkItem,
    ) -> Result<Option<WorkItem>, sqlx::Error> {
        let query = format!(
            "UPDATE work_items SET
                description = COALESCE($2, description),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                assigned_to = COALESCE($5, assigned_to),
                last_action = COALESCE($6, last_action),
                next_action = COALESCE($7, next_action),
                notes = COALESCE($8, notes),
                due_date = COALESCE($9, due_date),
                order_id = COALESCE($10, order_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(&input.assigned_to)
            .bind(&input.last_action)
            .bind(&input.next_action)
            .bind(&input.notes)
            .bind(input.due_date)
            .bind(input.order_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a work item by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM work_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
