//! Work item (triage queue) model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `work_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkItem {
    pub id: DbId,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub entered_by: String,
    pub last_action: Option<String>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub order_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a work item.
#[derive(Debug, Deserialize)]
pub struct CreateWorkItem {
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assigned_to: Option<String>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub order_id: Option<DbId>,
}

/// DTO for a partial work item update.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkItem {
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub last_action: Option<String>,
    pub next_action: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub order_id: Option<DbId>,
}

/// Optional filters for listing work items.
#[derive(Debug, Default, Deserialize)]
pub struct WorkItemFilter {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
