use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{AssignmentService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{entities::Assignment, requests::UpdateAssignmentRequest};
use crate::models::auth::Identity;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::{normalize_document_link, normalize_title, require_text};

/// 部分更新作业，仅班级所有者可操作
pub async fn update_assignment(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    assignment_id: i64,
    update: UpdateAssignmentRequest,
) -> Result<Assignment> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;
    let class = storage
        .get_class_by_id(assignment.class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;

    authorize(identity, ClassAction::ManageCoursework(&class))?;

    let update = UpdateAssignmentRequest {
        title: update.title.as_deref().map(normalize_title).transpose()?,
        instructions: update
            .instructions
            .as_deref()
            .map(|i| require_text("Instructions", i))
            .transpose()?,
        document_link: update
            .document_link
            .as_deref()
            .map(normalize_document_link)
            .transpose()?,
        deadline: update.deadline,
    };

    storage
        .update_assignment(assignment_id, update)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))
}

pub async fn handle_update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match update_assignment(&storage, &identity, assignment_id, update_data).await {
        Ok(assignment) => {
            info!("Assignment {} updated by {}", assignment.id, identity.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "Assignment updated successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
