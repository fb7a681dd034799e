//! Material line-item model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub order_id: DbId,
    pub item_name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub status: String,
    pub purchase_order_id: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a material to an order.
#[derive(Debug, Deserialize)]
pub struct CreateMaterial {
    pub item_name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub purchase_order_id: Option<DbId>,
    pub notes: Option<String>,
}
