use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::{AssignmentService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::assignments::{entities::Submission, requests::SubmitAnswerRequest};
use crate::models::auth::Identity;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::normalize_document_link;

/// 提交作业答案
///
/// 仅班级学生可提交，截止时间之后拒绝；重复提交由唯一索引拒绝为
/// `AlreadySubmitted`。
pub async fn submit_answer(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    assignment_id: i64,
    answer: SubmitAnswerRequest,
) -> Result<Submission> {
    let document_link = normalize_document_link(&answer.document_link)?;

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;
    let class = storage
        .get_class_by_id(assignment.class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Assignment not found"))?;

    let is_member = storage
        .is_class_member(class.id, identity.user_id)
        .await?;
    authorize(identity, ClassAction::Submit { class: &class, is_member })?;

    if assignment.is_past_deadline(chrono::Utc::now()) {
        return Err(ClassHubError::validation("Assignment deadline has passed"));
    }

    storage
        .create_submission(assignment.id, identity.user_id, &document_link)
        .await
}

pub async fn handle_submit_answer(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    answer: SubmitAnswerRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match submit_answer(&storage, &identity, assignment_id, answer).await {
        Ok(submission) => {
            info!(
                "Student {} submitted assignment {}",
                identity.user_id, submission.assignment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "Answer submitted successfully")))
        }
        Err(e @ ClassHubError::AlreadySubmitted(_)) => {
            warn!(
                "Student {} resubmitted assignment {}",
                identity.user_id, assignment_id
            );
            Ok(error_response(&e))
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
    use crate::services::classes::join::join_class;
    use crate::services::classes::testing::{seed_identity, setup};
    use chrono::{Duration, Utc};

    fn answer(link: &str) -> SubmitAnswerRequest {
        SubmitAnswerRequest {
            document_link: link.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_student_submits_once() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        join_class(&storage, &student, &class.code).await.unwrap();
        let assignment = create_assignment(
            &storage,
            &teacher,
            class.id,
            homework("HW 1", Some(Utc::now() + Duration::days(7))),
        )
        .await
        .unwrap();

        let submission = submit_answer(&storage, &student, assignment.id, answer("https://a.example.com"))
            .await
            .unwrap();
        assert_eq!(submission.student_id, student.user_id);
        assert_eq!(submission.document_link, "https://a.example.com");

        let err = submit_answer(&storage, &student, assignment.id, answer("https://b.example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassHubError::AlreadySubmitted(_)));
    }

    #[actix_web::test]
    async fn test_submission_rules() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let member = seed_identity(&storage, "student1", UserRole::Student).await;
        let outsider = seed_identity(&storage, "student2", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        join_class(&storage, &member, &class.code).await.unwrap();
        let assignment = create_assignment(&storage, &teacher, class.id, homework("HW 1", None))
            .await
            .unwrap();

        assert!(matches!(
            submit_answer(&storage, &member, assignment.id, answer("")).await,
            Err(ClassHubError::Validation(_))
        ));
        assert!(matches!(
            submit_answer(&storage, &member, 999, answer("https://a.example.com")).await,
            Err(ClassHubError::NotFound(_))
        ));
        assert!(matches!(
            submit_answer(&storage, &outsider, assignment.id, answer("https://a.example.com")).await,
            Err(ClassHubError::Forbidden(_))
        ));
        assert!(matches!(
            submit_answer(&storage, &teacher, assignment.id, answer("https://a.example.com")).await,
            Err(ClassHubError::Forbidden(_))
        ));
    }

    #[actix_web::test]
    async fn test_late_submission_is_rejected() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        join_class(&storage, &student, &class.code).await.unwrap();
        let assignment = create_assignment(
            &storage,
            &teacher,
            class.id,
            homework("HW 1", Some(Utc::now() - Duration::hours(1))),
        )
        .await
        .unwrap();

        assert!(matches!(
            submit_answer(&storage, &student, assignment.id, answer("https://a.example.com")).await,
            Err(ClassHubError::Validation(_))
        ));
        assert!(storage.list_submissions(assignment.id).await.unwrap().is_empty());
    }
}
