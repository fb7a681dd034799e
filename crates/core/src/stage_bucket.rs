//! Display-side bucketing of a workflow status into its coarse stage.
//!
//! This is a read-only aid for list filtering and board columns; nothing
//! persisted ever consults it. The grouping comes straight from the
//! workflow definition table, so there is exactly one stage-grouping
//! source of truth.
//!
//! Contract: a missing or empty status maps to the first bucket
//! (`LEAD_ACQUISITION`), and so does a status no table knows about. The
//! silent default is deliberate -- unclassifiable rows belong at the top
//! of the funnel, not in an error response.

use crate::workflow::{stage_of_status, WorkflowType};

/// The bucket used when a status is absent or unrecognized.
pub const DEFAULT_BUCKET: &str = "LEAD_ACQUISITION";

/// Map a free-form workflow status to its stage bucket id.
pub fn bucket_for_status(status: Option<&str>) -> &'static str {
    let status = match status {
        Some(s) if !s.is_empty() => s,
        _ => return DEFAULT_BUCKET,
    };

    WorkflowType::ALL
        .iter()
        .find_map(|&wt| stage_of_status(wt, status))
        .map(|stage| stage.id)
        .unwrap_or(DEFAULT_BUCKET)
}
