//! Repository for the `tasks` table.

use sqlx::PgPool;

use orderdesk_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use orderdesk_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

/// Column list for `tasks` queries.
const COLUMNS: &str = "id, title, status, priority, assigned_to, order_id, start_date, \
    due_date, description, estimated_hours, next_action, notes, created_by, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Create a new task, returning the created row.
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (title, status, priority, assigned_to, order_id, start_date, due_date,
                 description, estimated_hours, next_action, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.assigned_to)
            .bind(input.order_id)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(&input.description)
            .bind(input.estimated_hours)
            .bind(&input.next_action)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks with optional filters, due-date order then newest-first.
    pub async fn list(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR priority = $2)
               AND ($3::bigint IS NULL OR assigned_to = $3)
               AND ($4::bigint IS NULL OR order_id = $4)
             ORDER BY due_date ASC NULLS LAST, created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&filter.status)
            .bind(&filter.priority)
            .bind(filter.assigned_to)
            .bind(filter.order_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                status = COALESCE($3, status),
                priority = COALESCE($4, priority),
                assigned_to = COALESCE($5, assigned_to),
                order_id = COALESCE($6, order_id),
                start_date = COALESCE($7, start_date),
                due_date = COALESCE($8, due_date),
                description = COALESCE($9, description),
                estimated_hours = COALESCE($10, estimated_hours),
                next_action = COALESCE($11, next_action),
                notes = COALESCE($12, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.assigned_to)
            .bind(input.order_id)
            .bind(input.start_date)
            .bind(input.due_date)
            .bind(&input.description)
            .bind(input.estimated_hours)
            .bind(&input.next_action)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
