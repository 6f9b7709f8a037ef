//! 学生成就
//!
//! 学生本人与教授该学生的教师可以查看；只有教授该学生的教师可以记录。

pub mod get;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{ClassHubError, Result};
use crate::models::ErrorCode;
use crate::models::achievements::requests::RecordAchievementRequest;
use crate::models::auth::Identity;
use crate::services::classes::error_response_with_code;
use crate::storage::Storage;

use super::storage_from_request;

pub struct AchievementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AchievementService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 查看学生成就
    pub async fn get_student_achievements(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_student_achievements(self, request, student_id).await
    }

    // 记录学生成就
    pub async fn record_achievement(
        &self,
        request: &HttpRequest,
        student_id: i64,
        achievement: RecordAchievementRequest,
    ) -> ActixResult<HttpResponse> {
        record::handle_record_achievement(self, request, student_id, achievement).await
    }
}

/// 教师是否教授该学生；非教师恒为 false
async fn teaches(storage: &Arc<dyn Storage>, identity: &Identity, student_id: i64) -> Result<bool> {
    if !identity.is_teacher() {
        return Ok(false);
    }
    storage.teaches_student(identity.user_id, student_id).await
}

fn achievement_error_code(err: &ClassHubError) -> ErrorCode {
    match err {
        ClassHubError::Validation(_) => ErrorCode::AchievementInvalid,
        ClassHubError::NotFound(_) => ErrorCode::UserNotFound,
        ClassHubError::Forbidden(_) => ErrorCode::AchievementPermissionDenied,
        ClassHubError::Unavailable(_) | ClassHubError::DatabaseConnection(_) => {
            ErrorCode::StorageUnavailable
        }
        _ => ErrorCode::InternalServerError,
    }
}

pub(crate) fn error_response(err: &ClassHubError) -> HttpResponse {
    error_response_with_code(err, achievement_error_code(err))
}
