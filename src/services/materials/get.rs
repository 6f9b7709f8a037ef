use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{MaterialService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::materials::entities::Material;
use crate::services::require_identity;
use crate::storage::Storage;

pub async fn get_material(storage: &Arc<dyn Storage>, material_id: i64) -> Result<Material> {
    storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Material not found"))
}

pub async fn handle_get_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_identity(request) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match get_material(&storage, material_id).await {
        Ok(material) => Ok(HttpResponse::Ok().json(ApiResponse::success(material, "Material retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}
