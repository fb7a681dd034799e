//! Quote model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `quotes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: DbId,
    pub order_id: DbId,
    pub quote_number: String,
    pub amount: f64,
    pub status: String,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// All valid quote statuses.
pub const VALID_QUOTE_STATUSES: &[&str] = &["DRAFT", "SENT", "ACCEPTED", "DECLINED"];

/// DTO for creating a quote under an order.
#[derive(Debug, Deserialize)]
pub struct CreateQuote {
    pub quote_number: String,
    pub amount: f64,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for updating a quote.
#[derive(Debug, Deserialize)]
pub struct UpdateQuote {
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}
