//! Task model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<DbId>,
    pub order_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<DbId>,
    pub order_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
}

/// DTO for a partial task update.
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
    pub order_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
}

/// Optional filters for listing tasks.
#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
    pub order_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
