use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{AssignmentService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::models::auth::Identity;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::error_response_with_code;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::{normalize_document_link, normalize_title, require_text};

/// 布置作业，仅班级所有者可操作；标题、说明与文档链接必填
pub async fn create_assignment(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    class_id: i64,
    assignment: CreateAssignmentRequest,
) -> Result<Assignment> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    authorize(identity, ClassAction::ManageCoursework(&class))?;

    let assignment = CreateAssignmentRequest {
        title: normalize_title(&assignment.title)?,
        instructions: require_text("Instructions", &assignment.instructions)?,
        document_link: normalize_document_link(&assignment.document_link)?,
        deadline: assignment.deadline,
    };

    storage.create_assignment(class.id, assignment).await
}

pub async fn handle_create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match create_assignment(&storage, &identity, class_id, assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created in class {} by {}",
                assignment.id, assignment.class_id, identity.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "Assignment created successfully")))
        }
        Err(e @ ClassHubError::NotFound(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
