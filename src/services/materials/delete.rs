use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{MaterialService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::auth::Identity;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;

/// 删除资料，仅班级所有者可操作
pub async fn delete_material(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    material_id: i64,
) -> Result<()> {
    let material = storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Material not found"))?;
    let class = storage
        .get_class_by_id(material.class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Material not found"))?;

    authorize(identity, ClassAction::ManageCoursework(&class))?;

    if !storage.delete_material(material_id).await? {
        return Err(ClassHubError::not_found("Material not found"));
    }
    Ok(())
}

pub async fn handle_delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match delete_material(&storage, &identity, material_id).await {
        Ok(()) => {
            info!("Material {} deleted by {}", material_id, identity.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Material deleted successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
