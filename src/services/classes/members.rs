use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ClassService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::class_members::responses::ClassMembersResponse;
use crate::services::require_identity;
use crate::storage::Storage;

/// 班级教师与学生摘要
pub async fn get_class_members(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<ClassMembersResponse> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    let teacher = storage
        .get_user_by_id(class.teacher_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class teacher not found"))?;

    let students = storage
        .list_class_members(class.id)
        .await?
        .iter()
        .map(|u| u.summary())
        .collect();

    Ok(ClassMembersResponse {
        class_id: class.id,
        teacher: teacher.summary(),
        students,
    })
}

pub async fn handle_get_class_members(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_identity(request) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match get_class_members(&storage, class_id).await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(members, "Class members retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}
