use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{AssignmentService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::auth::Identity;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;

/// 删除作业及其全部提交，仅班级所有者可操作
pub async fn delete_assignment(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    assignment_id: i64,
) -> Result<()> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;
    let class = storage
        .get_class_by_id(assignment.class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;

    authorize(identity, ClassAction::ManageCoursework(&class))?;

    if !storage.delete_assignment(assignment_id).await? {
        return Err(ClassHubError::not_found("Assignment not found"));
    }
    Ok(())
}

pub async fn handle_delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match delete_assignment(&storage, &identity, assignment_id).await {
        Ok(()) => {
            info!("Assignment {} deleted by {}", assignment_id, identity.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::assignments::create::create_assignment;
    use crate::services::assignments::testing::homework;
    use crate::services::classes::create::create_class;
    use crate::services::classes::testing::{seed_identity, setup};

    #[actix_web::test]
    async fn test_only_owner_deletes() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        let assignment = create_assignment(&storage, &teacher, class.id, homework("HW 1", None))
            .await
            .unwrap();

        assert!(matches!(
            delete_assignment(&storage, &student, assignment.id).await,
            Err(ClassHubError::Forbidden(_))
        ));
        delete_assignment(&storage, &teacher, assignment.id).await.unwrap();
        assert!(matches!(
            delete_assignment(&storage, &teacher, assignment.id).await,
            Err(ClassHubError::NotFound(_))
        ));
    }
}
