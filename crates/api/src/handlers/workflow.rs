//! Read-only workflow definition endpoints.

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use orderdesk_core::workflow::{all_statuses, next_status, stages, StageDef, StatusDef, WorkflowType};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::WorkflowTypeParams;
use crate::response::DataResponse;

/// GET /orders/order-statuses?workflow_type=
///
/// The full flattened status list for a workflow type.
pub async fn order_statuses(
    _auth: AuthUser,
    Query(params): Query<WorkflowTypeParams>,
) -> AppResult<Json<DataResponse<Vec<StatusDef>>>> {
    let workflow_type = WorkflowType::parse(&params.workflow_type)?;
    Ok(Json(DataResponse {
        data: all_statuses(workflow_type),
    }))
}

/// GET /orders/workflow-stages?workflow_type=
///
/// The nested stage/status structure for a workflow type.
pub async fn workflow_stages(
    _auth: AuthUser,
    Query(params): Query<WorkflowTypeParams>,
) -> AppResult<Json<DataResponse<&'static [StageDef]>>> {
    let workflow_type = WorkflowType::parse(&params.workflow_type)?;
    Ok(Json(DataResponse {
        data: stages(workflow_type),
    }))
}

/// Query parameters for the next-status probe.
#[derive(Debug, Deserialize)]
pub struct NextStatusParams {
    pub workflow_type: String,
    pub current_status: String,
}

/// Response payload for the next-status probe.
#[derive(Debug, Serialize)]
pub struct NextStatusResponse {
    /// `null` when the current status is the final one.
    pub next_status: Option<&'static str>,
}

/// GET /orders/next-status?workflow_type=&current_status=
///
/// The status that follows `current_status` in the flattened sequence, or
/// `null` at the end of the workflow. 400 when the status is not part of
/// the workflow.
pub async fn probe_next_status(
    _auth: AuthUser,
    Query(params): Query<NextStatusParams>,
) -> AppResult<Json<DataResponse<NextStatusResponse>>> {
    let workflow_type = WorkflowType::parse(&params.workflow_type)?;
    let following = next_status(workflow_type, &params.current_status)?;
    Ok(Json(DataResponse {
        data: NextStatusResponse {
            next_status: following,
        },
    }))
}
