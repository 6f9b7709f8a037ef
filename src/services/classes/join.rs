use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::policy::{ClassAction, authorize};
use super::{ClassService, error_response, error_response_with_code};
use crate::errors::{ClassHubError, Result};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::auth::Identity;
use crate::models::classes::{requests::JoinClassRequest, responses::JoinClassResponse};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::normalize_class_code;

/// 通过邀请码加入班级
///
/// 成员关系以单条插入写入，并发重复加入由唯一索引拒绝为 `AlreadyMember`。
pub async fn join_class(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    code: &str,
) -> Result<JoinClassResponse> {
    let code = normalize_class_code(code)?;

    let class = storage
        .get_class_by_code(&code)
        .await?
        .ok_or_else(|| ClassHubError::not_found("No class matches this code"))?;

    authorize(identity, ClassAction::Join(&class))?;

    if storage.is_class_member(class.id, identity.user_id).await? {
        return Err(ClassHubError::already_member(
            "User is already a member of this class",
        ));
    }

    storage.add_class_member(class.id, identity.user_id).await?;

    Ok(JoinClassResponse { class_id: class.id })
}

pub async fn handle_join_class(
    service: &ClassService,
    request: &HttpRequest,
    join_data: JoinClassRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match join_class(&storage, &identity, &join_data.code).await {
        Ok(joined) => {
            info!("User {} joined class {}", identity.user_id, joined.class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(joined, "Joined class successfully")))
        }
        Err(e @ ClassHubError::Validation(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassCodeInvalid))
        }
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
    async fn test_join_twice_is_already_member() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();

        let joined = join_class(&storage, &student, &class.code).await.unwrap();
        assert_eq!(joined.class_id, class.id);

        let err = join_class(&storage, &student, &class.code)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassHubError::AlreadyMember(_)));
        assert_eq!(storage.count_class_members(class.id).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_join_code_is_case_insensitive() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();

        let typed = format!("  {}  ", class.code.to_lowercase());
        let joined = join_class(&storage, &student, &typed).await.unwrap();
        assert_eq!(joined.class_id, class.id);
    }

    #[actix_web::test]
    async fn test_join_rejects_bad_input() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();

        assert!(matches!(
            join_class(&storage, &student, "  ").await,
            Err(ClassHubError::Validation(_))
        ));
        assert!(matches!(
            join_class(&storage, &student, "NOPE00").await,
            Err(ClassHubError::NotFound(_))
        ));
        assert!(matches!(
            join_class(&storage, &teacher, &class.code).await,
            Err(ClassHubError::Forbidden(_))
        ));
    }
}
