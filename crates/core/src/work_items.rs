//! Work item (triage queue) constants and validation.
//!
//! Work items track lightweight follow-ups from first contact through
//! billing; their status vocabulary is broader than the task board's and
//! mirrors the shop's funnel.

use crate::error::CoreError;

/// All valid work item statuses, funnel order.
pub const VALID_WORK_ITEM_STATUSES: &[&str] = &[
    // Lead acquisition and initial contact
    "New Lead",
    "Follow Up",
    "Interested",
    "Not Interested",
    // Project specification and quote
    "Active Project",
    "Quote Prepared",
    "Quote Sent",
    "Quote Accepted",
    // Materials ordering and delivery
    "Materials Ordering",
    "Materials Ordered",
    "Partial Received",
    "Received",
    "Ready for Delivery",
    "Delivered",
    // Billing and follow-up
    "Invoiced",
    "Paid",
    "Completed",
    "Follow-up Complete",
];

/// All valid work item priorities.
pub const VALID_WORK_ITEM_PRIORITIES: &[&str] = &["Urgent", "High", "Medium", "Low"];

/// Validate a work item status string.
pub fn validate_work_item_status(status: &str) -> Result<(), CoreError> {
    if VALID_WORK_ITEM_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status. Must be one of: {}",
            VALID_WORK_ITEM_STATUSES.join(", ")
        )))
    }
}

/// Validate a work item priority string.
pub fn validate_work_item_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_WORK_ITEM_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority. Must be one of: {}",
            VALID_WORK_ITEM_PRIORITIES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert!(validate_work_item_status("New Lead").is_ok());
        assert!(validate_work_item_status("Follow-up Complete").is_ok());
        assert!(validate_work_item_status("NEW_LEAD").is_err());
    }

    #[test]
    fn test_priorities() {
        assert!(validate_work_item_priority("Urgent").is_ok());
        assert!(validate_work_item_priority("URGENT").is_err());
    }
}
