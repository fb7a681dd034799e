//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameter selecting a workflow type (`?workflow_type=`).
#[derive(Debug, Deserialize)]
pub struct WorkflowTypeParams {
    pub workflow_type: String,
}
