//! The canonical workflow definition table and stage advancement logic.
//!
//! Each order belongs to exactly one [`WorkflowType`], which selects an
//! ordered list of stages; each stage holds an ordered list of statuses.
//! Status ids are unique within a workflow type, so the flattened status
//! sequence (stage order, then status order) is the single source of truth
//! for "what comes next" and for progress computation.
//!
//! The tables are immutable configuration compiled into the binary. Admin
//! edits to the workflow are a schema change, not a runtime operation.

use serde::Serialize;

use crate::error::CoreError;

/// A leaf workflow state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatusDef {
    pub id: &'static str,
    pub name: &'static str,
}

/// A named, ordered group of statuses representing a coarse phase.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageDef {
    pub id: &'static str,
    pub name: &'static str,
    pub statuses: &'static [StatusDef],
}

/// Top-level classification of an order, selecting the stage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowType {
    MaterialsOnly,
    MaterialsAndInstallation,
}

impl WorkflowType {
    pub const ALL: [WorkflowType; 2] = [
        WorkflowType::MaterialsOnly,
        WorkflowType::MaterialsAndInstallation,
    ];

    /// The wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowType::MaterialsOnly => "MATERIALS_ONLY",
            WorkflowType::MaterialsAndInstallation => "MATERIALS_AND_INSTALLATION",
        }
    }

    /// Parse the wire representation.
    ///
    /// Unrecognized values are a validation error (HTTP 400 at the edge),
    /// never a silent fallback to a default table.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "MATERIALS_ONLY" => Ok(WorkflowType::MaterialsOnly),
            "MATERIALS_AND_INSTALLATION" => Ok(WorkflowType::MaterialsAndInstallation),
            other => Err(CoreError::Validation(format!(
                "Invalid workflow type '{other}'. Must be MATERIALS_ONLY or MATERIALS_AND_INSTALLATION"
            ))),
        }
    }
}

impl std::fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Materials-only workflow: 5 stages, 11 statuses.
const MATERIALS_ONLY_STAGES: &[StageDef] = &[
    StageDef {
        id: "LEAD_ACQUISITION",
        name: "Lead Acquisition",
        statuses: &[
            StatusDef { id: "NEW_LEAD", name: "New Lead" },
            StatusDef { id: "QUOTE_REQUESTED", name: "Quote Requested" },
        ],
    },
    StageDef {
        id: "QUOTATION",
        name: "Quotation",
        statuses: &[
            StatusDef { id: "QUOTE_SENT", name: "Quote Sent" },
            StatusDef { id: "QUOTE_ACCEPTED", name: "Quote Accepted" },
        ],
    },
    StageDef {
        id: "PROCUREMENT",
        name: "Procurement",
        statuses: &[
            StatusDef { id: "PO_CREATED", name: "PO Created" },
            StatusDef { id: "MATERIALS_ORDERED", name: "Materials Ordered" },
        ],
    },
    StageDef {
        id: "FULFILLMENT",
        name: "Fulfillment",
        statuses: &[
            StatusDef { id: "MATERIALS_RECEIVED", name: "Materials Received" },
            StatusDef { id: "DELIVERED", name: "Delivered" },
        ],
    },
    StageDef {
        id: "FINALIZATION",
        name: "Finalization",
        statuses: &[
            StatusDef { id: "INVOICE_SENT", name: "Invoice Sent" },
            StatusDef { id: "PAYMENT_RECEIVED", name: "Payment Received" },
            StatusDef { id: "COMPLETED", name: "Completed" },
        ],
    },
];

/// Materials-and-installation workflow: 5 stages, 25 statuses.
const MATERIALS_AND_INSTALLATION_STAGES: &[StageDef] = &[
    StageDef {
        id: "LEAD_ACQUISITION",
        name: "Lead Acquisition",
        statuses: &[
            StatusDef { id: "NEW_LEAD", name: "New Lead" },
            StatusDef { id: "SITE_VISIT_SCHEDULED", name: "Site Visit Scheduled" },
            StatusDef { id: "SITE_VISIT_COMPLETED", name: "Site Visit Completed" },
        ],
    },
    StageDef {
        id: "QUOTATION",
        name: "Quotation",
        statuses: &[
            StatusDef { id: "QUOTE_REQUESTED", name: "Quote Requested" },
            StatusDef { id: "QUOTE_PREPARED", name: "Quote Prepared" },
            StatusDef { id: "QUOTE_SENT", name: "Quote Sent" },
            StatusDef { id: "QUOTE_ACCEPTED", name: "Quote Accepted" },
        ],
    },
    StageDef {
        id: "PROCUREMENT",
        name: "Procurement",
        statuses: &[
            StatusDef { id: "WORK_ORDER_CREATED", name: "Work Order Created" },
            StatusDef { id: "WORK_ORDER_SENT", name: "Work Order Sent" },
            StatusDef { id: "WORK_ORDER_SIGNED", name: "Work Order Signed" },
            StatusDef { id: "DEPOSIT_REQUESTED", name: "Deposit Requested" },
            StatusDef { id: "DEPOSIT_RECEIVED", name: "Deposit Received" },
            StatusDef { id: "DETAILED_MEASUREMENT", name: "Detailed Measurement" },
            StatusDef { id: "PO_CREATED", name: "PO Created" },
            StatusDef { id: "MATERIALS_ORDERED", name: "Materials Ordered" },
        ],
    },
    StageDef {
        id: "FULFILLMENT",
        name: "Fulfillment",
        statuses: &[
            StatusDef { id: "INSTALLATION_SCHEDULED", name: "Installation Scheduled" },
            StatusDef { id: "MATERIALS_RECEIVED", name: "Materials Received" },
            StatusDef { id: "INSTALLATION_READY", name: "Installation Ready" },
            StatusDef { id: "INSTALLATION_IN_PROGRESS", name: "Installation In Progress" },
            StatusDef { id: "INSTALLATION_COMPLETED", name: "Installation Completed" },
            StatusDef { id: "FINAL_INSPECTION", name: "Final Inspection" },
        ],
    },
    StageDef {
        id: "FINALIZATION",
        name: "Finalization",
        statuses: &[
            StatusDef { id: "INVOICE_SENT", name: "Invoice Sent" },
            StatusDef { id: "PAYMENT_RECEIVED", name: "Payment Received" },
            StatusDef { id: "COMPLETED", name: "Completed" },
            StatusDef { id: "REVIEW_REQUESTED", name: "Review Requested" },
        ],
    },
];

/// The ordered stage list for a workflow type.
pub fn stages(workflow_type: WorkflowType) -> &'static [StageDef] {
    match workflow_type {
        WorkflowType::MaterialsOnly => MATERIALS_ONLY_STAGES,
        WorkflowType::MaterialsAndInstallation => MATERIALS_AND_INSTALLATION_STAGES,
    }
}

/// All statuses for a workflow type, flattened in stage order then status
/// order. Non-empty and duplicate-free by construction.
pub fn all_statuses(workflow_type: WorkflowType) -> Vec<StatusDef> {
    stages(workflow_type)
        .iter()
        .flat_map(|stage| stage.statuses.iter().copied())
        .collect()
}

/// The first status of a workflow type (the state a new order starts in).
pub fn first_status(workflow_type: WorkflowType) -> StatusDef {
    stages(workflow_type)[0].statuses[0]
}

/// Whether `status_id` is a valid status for the workflow type.
pub fn contains_status(workflow_type: WorkflowType, status_id: &str) -> bool {
    stages(workflow_type)
        .iter()
        .any(|stage| stage.statuses.iter().any(|s| s.id == status_id))
}

/// The stage that defines `status_id`, if any.
pub fn stage_of_status(workflow_type: WorkflowType, status_id: &str) -> Option<&'static StageDef> {
    stages(workflow_type)
        .iter()
        .find(|stage| stage.statuses.iter().any(|s| s.id == status_id))
}

/// Validate that a status belongs to the workflow type.
pub fn validate_status(workflow_type: WorkflowType, status_id: &str) -> Result<(), CoreError> {
    if contains_status(workflow_type, status_id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status_id}' for workflow type {workflow_type}"
        )))
    }
}

/// The status immediately following `current_status_id` in the flattened
/// sequence.
///
/// Returns `Ok(None)` when the current status is terminal (last in
/// sequence); errors when the status is not part of the workflow at all.
/// Purely a function of the inputs and the static tables above.
pub fn next_status(
    workflow_type: WorkflowType,
    current_status_id: &str,
) -> Result<Option<&'static str>, CoreError> {
    let sequence = all_statuses(workflow_type);
    let index = sequence
        .iter()
        .position(|s| s.id == current_status_id)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid status '{current_status_id}' for workflow type {workflow_type}"
            ))
        })?;

    Ok(sequence.get(index + 1).map(|s| s.id))
}

/// Progress as a whole percentage: round(100 * completed / total), clamped
/// to [0, 100].
pub fn progress_percentage(completed_count: usize, total_count: usize) -> i32 {
    if total_count == 0 {
        return 0;
    }
    let pct = (completed_count as f64 / total_count as f64 * 100.0).round() as i32;
    pct.clamp(0, 100)
}

/// Append `status_id` to the completed set if not already present.
///
/// Returns `true` if it was inserted. Membership-idempotent: re-completing
/// a status never produces a duplicate entry.
pub fn push_completed(completed: &mut Vec<String>, status_id: &str) -> bool {
    if completed.iter().any(|s| s == status_id) {
        return false;
    }
    completed.push(status_id.to_string());
    true
}

/// Remove `status_id` from the completed set.
///
/// Returns `true` if it was present. Removing a never-completed status is
/// a no-op, not an error.
pub fn remove_completed(completed: &mut Vec<String>, status_id: &str) -> bool {
    let before = completed.len();
    completed.retain(|s| s != status_id);
    completed.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_statuses_nonempty_and_unique() {
        for workflow_type in WorkflowType::ALL {
            let statuses = all_statuses(workflow_type);
            assert!(!statuses.is_empty());

            let mut ids: Vec<&str> = statuses.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(
                ids.len(),
                statuses.len(),
                "duplicate status id in {workflow_type}"
            );
        }
    }

    #[test]
    fn test_flattened_lengths() {
        assert_eq!(all_statuses(WorkflowType::MaterialsOnly).len(), 11);
        assert_eq!(all_statuses(WorkflowType::MaterialsAndInstallation).len(), 25);
    }

    #[test]
    fn test_first_status_is_new_lead() {
        for workflow_type in WorkflowType::ALL {
            assert_eq!(first_status(workflow_type).id, "NEW_LEAD");
        }
    }

    #[test]
    fn test_next_status_walks_the_sequence() {
        for workflow_type in WorkflowType::ALL {
            let statuses = all_statuses(workflow_type);
            for window in statuses.windows(2) {
                let next = next_status(workflow_type, window[0].id).unwrap();
                assert_eq!(next, Some(window[1].id));
            }
        }
    }

    #[test]
    fn test_next_status_terminal_returns_none() {
        for workflow_type in WorkflowType::ALL {
            let last = all_statuses(workflow_type).last().unwrap().id;
            assert_eq!(next_status(workflow_type, last).unwrap(), None);
        }
    }

    #[test]
    fn test_next_status_unknown_is_error() {
        let result = next_status(WorkflowType::MaterialsOnly, "NOT_A_STATUS");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid status 'NOT_A_STATUS'"));
    }

    #[test]
    fn test_installation_statuses_only_in_mi_workflow() {
        assert!(!contains_status(
            WorkflowType::MaterialsOnly,
            "INSTALLATION_SCHEDULED"
        ));
        assert!(contains_status(
            WorkflowType::MaterialsAndInstallation,
            "INSTALLATION_SCHEDULED"
        ));
    }

    #[test]
    fn test_stage_of_status() {
        let stage = stage_of_status(WorkflowType::MaterialsOnly, "PO_CREATED").unwrap();
        assert_eq!(stage.id, "PROCUREMENT");
        assert!(stage_of_status(WorkflowType::MaterialsOnly, "bogus").is_none());
    }

    #[test]
    fn test_parse_workflow_type() {
        assert_eq!(
            WorkflowType::parse("MATERIALS_ONLY").unwrap(),
            WorkflowType::MaterialsOnly
        );
        assert_eq!(
            WorkflowType::parse("MATERIALS_AND_INSTALLATION").unwrap(),
            WorkflowType::MaterialsAndInstallation
        );
        assert!(WorkflowType::parse("materials_only").is_err());
        assert!(WorkflowType::parse("").is_err());
    }

    #[test]
    fn test_progress_percentage_rounds_and_clamps() {
        assert_eq!(progress_percentage(0, 11), 0);
        assert_eq!(progress_percentage(2, 11), 18); // round(18.18)
        assert_eq!(progress_percentage(11, 11), 100);
        assert_eq!(progress_percentage(12, 11), 100); // clamped
        assert_eq!(progress_percentage(3, 0), 0);
    }

    #[test]
    fn test_push_completed_is_idempotent() {
        let mut completed = Vec::new();
        assert!(push_completed(&mut completed, "NEW_LEAD"));
        assert!(push_completed(&mut completed, "QUOTE_REQUESTED"));
        assert!(!push_completed(&mut completed, "NEW_LEAD"));
        assert_eq!(completed, vec!["NEW_LEAD", "QUOTE_REQUESTED"]);
    }

    #[test]
    fn test_remove_completed() {
        let mut completed = vec!["NEW_LEAD".to_string(), "QUOTE_REQUESTED".to_string()];
        assert!(remove_completed(&mut completed, "NEW_LEAD"));
        assert_eq!(completed, vec!["QUOTE_REQUESTED"]);
        // Never-completed status: no-op.
        assert!(!remove_completed(&mut completed, "PO_CREATED"));
        assert_eq!(completed, vec!["QUOTE_REQUESTED"]);
    }
}
