use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{AchievementService, error_response, teaches};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::achievements::{entities::Achievement, requests::RecordAchievementRequest};
use crate::models::auth::Identity;
use crate::models::users::entities::UserRole;
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::{normalize_title, validate_progress};

/// 记录学生成就，同名成就覆盖；仅教授该学生的教师可操作
pub async fn record_achievement(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    student_id: i64,
    achievement: RecordAchievementRequest,
) -> Result<Achievement> {
    let student = storage
        .get_user_by_id(student_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Student not found"))?;
    if student.role != UserRole::Student {
        return Err(ClassHubError::validation("Achievements can only be recorded for students"));
    }

    let teaches_student = teaches(storage, identity, student_id).await?;
    authorize(identity, ClassAction::RecordAchievement { teaches_student })?;

    let title = normalize_title(&achievement.title)?;
    let progress = validate_progress(achievement.progress)?;

    storage
        .upsert_achievement(student_id, &title, progress, achievement.is_completed())
        .await
}

pub async fn handle_record_achievement(
    service: &AchievementService,
    request: &HttpRequest,
    student_id: i64,
    achievement: RecordAchievementRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match record_achievement(&storage, &identity, student_id, achievement).await {
        Ok(achievement) => {
            info!(
                "Achievement '{}' for student {} set to {}% by {}",
                achievement.title, student_id, achievement.progress, identity.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(achievement, "Achievement recorded")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}
