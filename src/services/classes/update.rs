use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::policy::{ClassAction, authorize};
use super::{ClassService, error_response, error_response_with_code};
use crate::errors::{ClassHubError, Result};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::auth::Identity;
use crate::models::classes::{entities::Class, requests::UpdateClassRequest};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::normalize_class_name;

/// 更新班级，仅班级所有者可操作；不提供字段时原样返回
pub async fn update_class(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    class_id: i64,
    update: UpdateClassRequest,
) -> Result<Class> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    authorize(identity, ClassAction::Update(&class))?;

    let update = UpdateClassRequest {
        name: update.name.as_deref().map(normalize_class_name).transpose()?,
    };

    storage
        .update_class(class_id, update)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))
}

pub async fn handle_update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match update_class(&storage, &identity, class_id, update_data).await {
        Ok(class) => {
            info!("Class {} updated by {}", class.id, identity.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Err(e @ ClassHubError::Validation(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassNameInvalid))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
