use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ClassService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::classes::responses::ClassCodeResponse;
use crate::services::require_identity;
use crate::storage::Storage;

/// 查询班级邀请码
pub async fn get_class_code(storage: &Arc<dyn Storage>, class_id: i64) -> Result<ClassCodeResponse> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    Ok(ClassCodeResponse {
        class_id: class.id,
        code: class.code,
    })
}

pub async fn handle_get_class_code(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_identity(request) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match get_class_code(&storage, class_id).await {
        Ok(code) => Ok(HttpResponse::Ok().json(ApiResponse::success(code, "Class code retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::classes::create::create_class;
    use crate::services::classes::testing::{seed_identity, setup};

    #[actix_web::test]
    async fn test_get_code() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();

        let resp = get_class_code(&storage, class.id).await.unwrap();
        assert_eq!(resp.class_id, class.id);
        assert_eq!(resp.code, class.code);
    }

    #[actix_web::test]
    async fn test_unknown_class_is_not_found() {
        let storage = setup().await;
        let err = get_class_code(&storage, 404).await.unwrap_err();
        assert!(matches!(err, ClassHubError::NotFound(_)));
    }
}
