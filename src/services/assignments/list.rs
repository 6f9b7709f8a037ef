use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::error_response_with_code;
use crate::services::require_identity;
use crate::storage::Storage;

/// 班级作业，按布置顺序
///
/// 空列表在 HTTP 层返回 404 `AssignmentListEmpty`。
pub async fn list_assignments(storage: &Arc<dyn Storage>, class_id: i64) -> Result<Vec<Assignment>> {
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Err(ClassHubError::not_found("Class not found"));
    }
    storage.list_assignments_by_class(class_id).await
}

pub async fn handle_list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_identity(request) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match list_assignments(&storage, class_id).await {
        Ok(assignments) if assignments.is_empty() => {
            let err = ClassHubError::not_found("No assignments for this class");
            Ok(error_response_with_code(&err, ErrorCode::AssignmentListEmpty))
        }
        Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "Assignments retrieved"))),
        Err(e @ ClassHubError::NotFound(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
