use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AchievementService, error_response, teaches};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::achievements::responses::StudentAchievementsResponse;
use crate::models::auth::Identity;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;

/// 学生成就列表，可以为空
pub async fn get_student_achievements(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    student_id: i64,
) -> Result<StudentAchievementsResponse> {
    if storage.get_user_by_id(student_id).await?.is_none() {
        return Err(ClassHubError::not_found("Student not found"));
    }

    let teaches_student = teaches(storage, identity, student_id).await?;
    authorize(
        identity,
        ClassAction::ViewAchievements {
            student_id,
            teaches_student,
        },
    )?;

    let achievements = storage.list_achievements_by_student(student_id).await?;
    Ok(StudentAchievementsResponse {
        student_id,
        achievements,
    })
}

pub async fn handle_get_student_achievements(
    service: &AchievementService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match get_student_achievements(&storage, &identity, student_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Achievements retrieved"))),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::classes::create::create_class;
    use crate::services::classes::join::join_class;
    use crate::services::classes::testing::{seed_identity, setup};

    #[actix_web::test]
    async fn test_student_sees_own_achievements() {
        let storage = setup().await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        storage
            .upsert_achievement(student.user_id, "First submission", 100, true)
            .await
            .unwrap();

        let response = get_student_achievements(&storage, &student, student.user_id)
            .await
            .unwrap();
        assert_eq!(response.student_id, student.user_id);
        assert_eq!(response.achievements.len(), 1);
        assert!(response.achievements[0].completed);
    }

    #[actix_web::test]
    async fn test_visibility_follows_teaching() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let stranger = seed_identity(&storage, "teacher2", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let classmate = seed_identity(&storage, "student2", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        join_class(&storage, &student, &class.code).await.unwrap();
        join_class(&storage, &classmate, &class.code).await.unwrap();

        let empty = get_student_achievements(&storage, &teacher, student.user_id)
            .await
            .unwrap();
        assert!(empty.achievements.is_empty());

        for identity in [&stranger, &classmate] {
            assert!(matches!(
                get_student_achievements(&storage, identity, student.user_id).await,
                Err(ClassHubError::Forbidden(_))
            ));
        }
        assert!(matches!(
            get_student_achievements(&storage, &teacher, 999).await,
            Err(ClassHubError::NotFound(_))
        ));
    }
}
