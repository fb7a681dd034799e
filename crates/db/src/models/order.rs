//! Order model and workflow-state write sets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `orders` table.
///
/// `workflow_status` is the current leaf status; `current_stage` caches the
/// stage that status belongs to. `completed_statuses` keeps insertion
/// order. `revision` is the optimistic-concurrency token: every workflow
/// write bumps it, and writers must present the revision they read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub order_number: String,
    pub workflow_type: String,
    pub customer_id: DbId,
    pub status: String,
    pub current_stage: Option<String>,
    pub workflow_status: Option<String>,
    pub completed_statuses: Vec<String>,
    pub progress_percentage: i32,
    pub notes: Option<String>,
    pub total_amount: Option<f64>,
    pub balance_due: Option<f64>,
    pub deposit_required: bool,
    pub deposit_amount: Option<f64>,
    pub deposit_received: bool,
    pub installation_date: Option<NaiveDate>,
    pub created_by: Option<DbId>,
    pub revision: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub order_number: String,
    pub workflow_type: String,
    pub customer_id: DbId,
    /// Lifecycle status; defaults to ACTIVE.
    pub status: Option<String>,
    /// Starting workflow status; defaults to the workflow's first status.
    pub workflow_status: Option<String>,
    pub notes: Option<String>,
    pub total_amount: Option<f64>,
    pub deposit_required: Option<bool>,
    pub deposit_amount: Option<f64>,
    pub installation_date: Option<NaiveDate>,
}

/// DTO for a partial order update. Workflow fields are deliberately absent;
/// those only move through the transition endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdateOrder {
    pub status: Option<String>,
    pub notes: Option<String>,
    pub total_amount: Option<f64>,
    pub balance_due: Option<f64>,
    pub deposit_required: Option<bool>,
    pub deposit_amount: Option<f64>,
    pub deposit_received: Option<bool>,
    pub installation_date: Option<NaiveDate>,
}

/// The workflow columns written together by a transition.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub workflow_status: Option<String>,
    pub current_stage: Option<String>,
    pub completed_statuses: Vec<String>,
    pub progress_percentage: i32,
}

/// Optional filters for listing orders.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFilter {
    pub status: Option<String>,
    pub workflow_type: Option<String>,
    pub customer_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
