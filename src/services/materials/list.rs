use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::MaterialService;
use crate::errors::{ClassHubError, Result};
use crate::models::materials::entities::Material;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::classes::error_response_with_code;
use crate::services::require_identity;
use crate::storage::Storage;

/// 班级资料，可以为空
pub async fn list_materials(storage: &Arc<dyn Storage>, class_id: i64) -> Result<Vec<Material>> {
    if storage.get_class_by_id(class_id).await?.is_none() {
        return Err(ClassHubError::not_found("Class not found"));
    }
    storage.list_materials_by_class(class_id).await
}

pub async fn handle_list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_identity(request) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match list_materials(&storage, class_id).await {
        Ok(materials) => Ok(HttpResponse::Ok().json(ApiResponse::success(materials, "Materials retrieved"))),
        Err(e @ ClassHubError::NotFound(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassNotFound))
        }
        Err(e) => Ok(super::error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::classes::create::create_class;
    use crate::services::classes::testing::{seed_identity, setup};
    use crate::services::materials::create::{create_material, tests::slides};

    #[actix_web::test]
    async fn test_empty_list_is_ok() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();

        assert!(list_materials(&storage, class.id).await.unwrap().is_empty());

        create_material(&storage, &teacher, class.id, slides("Week 1"))
            .await
            .unwrap();
        assert_eq!(list_materials(&storage, class.id).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_class_is_not_found() {
        let storage = setup().await;
        assert!(matches!(
            list_materials(&storage, 42).await,
            Err(ClassHubError::NotFound(_))
        ));
    }
}
