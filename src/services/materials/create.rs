use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{MaterialService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::auth::Identity;
use crate::models::materials::{entities::Material, requests::CreateMaterialRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::error_response_with_code;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::{normalize_document_link, normalize_title, require_text};

/// 为班级添加资料，仅班级所有者可操作
pub async fn create_material(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    class_id: i64,
    material: CreateMaterialRequest,
) -> Result<Material> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    authorize(identity, ClassAction::ManageCoursework(&class))?;

    let material = CreateMaterialRequest {
        title: normalize_title(&material.title)?,
        description: require_text("Description", &material.description)?,
        document_link: normalize_document_link(&material.document_link)?,
    };

    storage.create_material(class.id, material).await
}

pub async fn handle_create_material(
    service: &MaterialService,
    request: &HttpRequest,
    class_id: i64,
    material_data: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match create_material(&storage, &identity, class_id, material_data).await {
        Ok(material) => {
            info!(
                "Material {} added to class {} by {}",
                material.id, material.class_id, identity.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(material, "Material created successfully")))
        }
        Err(e @ ClassHubError::NotFound(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassNotFound))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
