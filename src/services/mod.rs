pub mod achievements;
pub mod assignments;
pub mod auth;
pub mod classes;
pub mod materials;

pub use achievements::AchievementService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use materials::MaterialService;

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use std::sync::Arc;

use crate::errors::ClassHubError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::Identity};
use crate::storage::Storage;

/// 从 app data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> actix_web::Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 取出 RequireJWT 写入的身份断言，缺失时返回 401 响应
pub(crate) fn require_identity(request: &HttpRequest) -> Result<Identity, HttpResponse> {
    RequireJWT::extract_identity(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing identity",
        ))
    })
}

/// 错误到 HTTP 状态码的统一映射
pub(crate) fn status_for(err: &ClassHubError) -> StatusCode {
    match err {
        ClassHubError::Validation(_)
        | ClassHubError::DateParse(_)
        | ClassHubError::AlreadyMember(_)
        | ClassHubError::NotMember(_)
        | ClassHubError::AlreadySubmitted(_) => StatusCode::BAD_REQUEST,
        ClassHubError::Authentication(_) => StatusCode::UNAUTHORIZED,
        ClassHubError::Forbidden(_) => StatusCode::FORBIDDEN,
        ClassHubError::NotFound(_) => StatusCode::NOT_FOUND,
        ClassHubError::Conflict(_) => StatusCode::CONFLICT,
        ClassHubError::Unavailable(_) | ClassHubError::DatabaseConnection(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ClassHubError::already_member("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ClassHubError::not_member("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ClassHubError::already_submitted("x")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ClassHubError::forbidden("x")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&ClassHubError::conflict("x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&ClassHubError::unavailable("x")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&ClassHubError::database_operation("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
