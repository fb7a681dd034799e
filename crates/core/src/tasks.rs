//! Task status/priority constants and validation.

use crate::error::CoreError;

/// All valid task statuses.
pub const VALID_TASK_STATUSES: &[&str] =
    &["Open", "In Progress", "Blocked", "Completed", "Closed"];

/// All valid task priorities. Must match the database enum values.
pub const VALID_TASK_PRIORITIES: &[&str] = &["URGENT", "HIGH", "MEDIUM", "LOW"];

/// Validate a task status string.
pub fn validate_task_status(status: &str) -> Result<(), CoreError> {
    if VALID_TASK_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status. Must be one of: {}",
            VALID_TASK_STATUSES.join(", ")
        )))
    }
}

/// Validate a task priority string.
pub fn validate_task_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_TASK_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority. Must be one of: {}",
            VALID_TASK_PRIORITIES.join(", ")
        )))
    }
}
