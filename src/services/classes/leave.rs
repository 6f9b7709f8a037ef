use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{ClassService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::auth::Identity;
use crate::services::require_identity;
use crate::storage::Storage;

/// 退出班级，是否原本为成员以删除的行数为准
pub async fn leave_class(storage: &Arc<dyn Storage>, identity: &Identity, class_id: i64) -> Result<()> {
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Err(ClassHubError::not_found("Class not found"));
    }

    if !storage
        .remove_class_member(class_id, identity.user_id)
        .await?
    {
        return Err(ClassHubError::not_member(
            "User is not a member of this class",
        ));
    }

    Ok(())
}

pub async fn handle_leave_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match leave_class(&storage, &identity, class_id).await {
        Ok(()) => {
            info!("User {} left class {}", identity.user_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Left class successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
