use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::responses::AssignmentDetailResponse;
use crate::models::auth::Identity;
use crate::services::require_identity;
use crate::storage::Storage;

/// 作业详情；班级所有者看到全部提交，其他用户只看到自己的
pub async fn get_assignment_by_id(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    assignment_id: i64,
) -> Result<AssignmentDetailResponse> {
    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;
    let class = storage
        .get_class_by_id(assignment.class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;

    let mut submissions = storage.list_submissions(assignment.id).await?;
    if !class.is_owned_by(identity.user_id) {
        submissions.retain(|s| s.student_id == identity.user_id);
    }

    Ok(AssignmentDetailResponse {
        assignment,
        submissions,
    })
}

pub async fn handle_get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match get_assignment_by_id(&storage, &identity, assignment_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Assignment retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::requests::SubmitAnswerRequest;
    use crate::models::users::entities::UserRole;
    use crate::services::assignments::create::create_assignment;
    use crate::services::assignments::submit::submit_answer;
    use crate::services::assignments::testing::homework;
    use crate::services::classes::create::create_class;
    use crate::services::classes::join::join_class;
    use crate::services::classes::testing::{seed_identity, setup};

    fn answer(link: &str) -> SubmitAnswerRequest {
        SubmitAnswerRequest {
            document_link: link.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_submissions_visible_by_role() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let alice = seed_identity(&storage, "alice1", UserRole::Student).await;
        let bob = seed_identity(&storage, "bob111", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        join_class(&storage, &alice, &class.code).await.unwrap();
        join_class(&storage, &bob, &class.code).await.unwrap();
        let assignment = create_assignment(&storage, &teacher, class.id, homework("HW 1", None))
            .await
            .unwrap();

        submit_answer(&storage, &alice, assignment.id, answer("https://a.example.com"))
            .await
            .unwrap();
        submit_answer(&storage, &bob, assignment.id, answer("https://b.example.com"))
            .await
            .unwrap();

        let owner_view = get_assignment_by_id(&storage, &teacher, assignment.id)
            .await
            .unwrap();
        assert_eq!(owner_view.submissions.len(), 2);

        let alice_view = get_assignment_by_id(&storage, &alice, assignment.id)
            .await
            .unwrap();
        assert_eq!(alice_view.submissions.len(), 1);
        assert_eq!(alice_view.submissions[0].student_id, alice.user_id);
        assert_eq!(alice_view.assignment.title, "HW 1");
    }

    #[actix_web::test]
    async fn test_unknown_assignment_is_not_found() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        assert!(matches!(
            get_assignment_by_id(&storage, &teacher, 404).await,
            Err(ClassHubError::NotFound(_))
        ));
    }
}
