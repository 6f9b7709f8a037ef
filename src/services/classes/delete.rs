use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::policy::{ClassAction, authorize};
use super::{ClassService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::auth::Identity;
use crate::services::require_identity;
use crate::storage::Storage;

/// 删除班级，成员关系一并移除
pub async fn delete_class(storage: &Arc<dyn Storage>, identity: &Identity, class_id: i64) -> Result<()> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    authorize(identity, ClassAction::Delete(&class))?;

    if !storage.delete_class(class_id).await? {
        return Err(ClassHubError::not_found("Class not found"));
    }

    Ok(())
}

pub async fn handle_delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match delete_class(&storage, &identity, class_id).await {
        Ok(()) => {
            info!("Class {} deleted by {}", class_id, identity.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
