use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ClassService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::classes::responses::ClassDetailResponse;
use crate::services::require_identity;
use crate::storage::Storage;

/// 班级详情，附带教师摘要与成员数量
pub async fn get_class_details(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<ClassDetailResponse> {
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class not found"))?;

    let teacher = storage
        .get_user_by_id(class.teacher_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Class teacher not found"))?;

    let member_count = storage.count_class_members(class.id).await?;

    Ok(ClassDetailResponse {
        id: class.id,
        name: class.name,
        code: class.code,
        teacher: teacher.summary(),
        member_count,
        created_at: class.created_at,
        updated_at: class.updated_at,
    })
}

pub async fn handle_get_class_details(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = require_identity(request) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match get_class_details(&storage, class_id).await {
        Ok(details) => Ok(HttpResponse::Ok().json(ApiResponse::success(details, "Class details retrieved"))),
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
    async fn test_details_resolve_teacher() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();

        let details = get_class_details(&storage, class.id).await.unwrap();
        assert_eq!(details.name, "Algebra");
        assert_eq!(details.teacher.username, "teacher1");
        assert_eq!(details.member_count, 0);
    }

    #[actix_web::test]
    async fn test_details_of_unknown_class() {
        let storage = setup().await;
        assert!(matches!(
            get_class_details(&storage, 9).await,
            Err(ClassHubError::NotFound(_))
        ));
    }
}
