//! Order event model. The log is append-only; there is no update DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `order_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderEvent {
    pub id: DbId,
    pub order_id: DbId,
    pub event_type: String,
    pub description: String,
    pub previous_stage: Option<String>,
    pub new_stage: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Query parameters for the order history listing.
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub event_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
