//! Purchase order model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `purchase_orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseOrder {
    pub id: DbId,
    pub order_id: DbId,
    pub po_number: String,
    pub supplier_name: String,
    pub issue_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub actual_delivery_date: Option<NaiveDate>,
    pub status: String,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a purchase order under an order.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrder {
    pub po_number: String,
    pub supplier_name: String,
    pub issue_date: NaiveDate,
    pub expected_delivery_date: Option<NaiveDate>,
    pub total_amount: f64,
    pub notes: Option<String>,
}

/// DTO for updating a purchase order.
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseOrder {
    pub supplier_name: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub actual_delivery_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
}
