//! Customer model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use orderdesk_core::types::{DbId, Timestamp};

/// A row from the `customers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: DbId,
    pub company_name: String,
    pub customer_type: String,
    pub contact_first_name: Option<String>,
    pub contact_last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "company_name must not be empty"))]
    pub company_name: String,
    /// RESIDENTIAL or COMMERCIAL.
    pub customer_type: String,
    pub contact_first_name: Option<String>,
    pub contact_last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a customer. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomer {
    pub company_name: Option<String>,
    pub customer_type: Option<String>,
    pub contact_first_name: Option<String>,
    pub contact_last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}
