//! Order lifecycle constants and validation.
//!
//! The lifecycle status is orthogonal to the workflow status: an order is
//! ACTIVE while it walks the workflow, COMPLETED when the final status is
//! reached, and CANCELLED instead of ever being hard-deleted.

use crate::error::CoreError;

/// Order created but not yet being worked.
pub const ORDER_STATUS_DRAFT: &str = "DRAFT";

/// Order in progress.
pub const ORDER_STATUS_ACTIVE: &str = "ACTIVE";

/// Order paused by the customer or the shop.
pub const ORDER_STATUS_ON_HOLD: &str = "ON_HOLD";

/// Workflow finished.
pub const ORDER_STATUS_COMPLETED: &str = "COMPLETED";

/// Soft-deleted. The row stays; only the status changes.
pub const ORDER_STATUS_CANCELLED: &str = "CANCELLED";

/// All valid order lifecycle statuses.
pub const VALID_ORDER_STATUSES: &[&str] = &[
    ORDER_STATUS_DRAFT,
    ORDER_STATUS_ACTIVE,
    ORDER_STATUS_ON_HOLD,
    ORDER_STATUS_COMPLETED,
    ORDER_STATUS_CANCELLED,
];

/// Validate an order lifecycle status.
pub fn validate_order_status(status: &str) -> Result<(), CoreError> {
    if VALID_ORDER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid order status '{status}'. Must be one of: {}",
            VALID_ORDER_STATUSES.join(", ")
        )))
    }
}

/// Validate an order number: non-empty, no surrounding whitespace.
pub fn validate_order_number(order_number: &str) -> Result<(), CoreError> {
    if order_number.trim().is_empty() {
        return Err(CoreError::Validation(
            "Order number must not be empty".to_string(),
        ));
    }
    if order_number.trim() != order_number {
        return Err(CoreError::Validation(
            "Order number must not have leading or trailing whitespace".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_order_statuses_accepted() {
        for status in VALID_ORDER_STATUSES {
            assert!(validate_order_status(status).is_ok());
        }
    }

    #[test]
    fn test_invalid_order_status_rejected() {
        assert!(validate_order_status("PENDING").is_err());
        assert!(validate_order_status("active").is_err());
        assert!(validate_order_status("").is_err());
    }

    #[test]
    fn test_order_number_validation() {
        assert!(validate_order_number("ORD-2025-0001").is_ok());
        assert!(validate_order_number("").is_err());
        assert!(validate_order_number("   ").is_err());
        assert!(validate_order_number(" ORD-1").is_err());
    }
}
