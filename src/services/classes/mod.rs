//! 班级与成员管理
//!
//! 每个操作拆为两层：接收 `Identity` 的核心函数返回 `errors::Result`，
//! 以及负责提取身份、映射错误响应的 HTTP 处理函数。

pub mod code;
pub mod code_generator;
pub mod create;
pub mod delete;
pub mod details;
pub mod join;
pub mod leave;
pub mod list;
pub mod members;
pub mod policy;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;
use tracing::error;

use crate::errors::ClassHubError;
use crate::models::classes::requests::{CreateClassRequest, JoinClassRequest, UpdateClassRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{status_for, storage_from_request};

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 教师创建班级
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_class(self, request, class_data).await
    }

    // 获取班级邀请码
    pub async fn get_class_code(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        code::handle_get_class_code(self, request, class_id).await
    }

    // 通过邀请码加入班级
    pub async fn join_class(
        &self,
        request: &HttpRequest,
        join_data: JoinClassRequest,
    ) -> ActixResult<HttpResponse> {
        join::handle_join_class(self, request, join_data).await
    }

    // 退出班级
    pub async fn leave_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        leave::handle_leave_class(self, request, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_class(self, request, class_id, update_data).await
    }

    // 删除班级
    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_class(self, request, class_id).await
    }

    // 教师创建的班级列表
    pub async fn list_teacher_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_teacher_classes(self, request).await
    }

    // 学生加入的班级列表
    pub async fn list_joined_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list_joined_classes(self, request).await
    }

    // 班级成员
    pub async fn get_class_members(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        members::handle_get_class_members(self, request, class_id).await
    }

    // 班级详情
    pub async fn get_class_details(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        details::handle_get_class_details(self, request, class_id).await
    }
}

/// 班级业务错误码
fn class_error_code(err: &ClassHubError) -> ErrorCode {
    match err {
        ClassHubError::Validation(_) | ClassHubError::DateParse(_) => ErrorCode::BadRequest,
        ClassHubError::AlreadyMember(_) => ErrorCode::ClassAlreadyJoined,
        ClassHubError::NotMember(_) => ErrorCode::ClassNotJoined,
        ClassHubError::Authentication(_) => ErrorCode::Unauthorized,
        ClassHubError::Forbidden(_) => ErrorCode::ClassPermissionDenied,
        ClassHubError::NotFound(_) => ErrorCode::ClassNotFound,
        ClassHubError::Conflict(_) => ErrorCode::ClassCodeConflict,
        ClassHubError::Unavailable(_) | ClassHubError::DatabaseConnection(_) => {
            ErrorCode::StorageUnavailable
        }
        _ => ErrorCode::InternalServerError,
    }
}

/// 将业务错误映射为统一格式的 HTTP 响应
pub(crate) fn error_response(err: &ClassHubError) -> HttpResponse {
    error_response_with_code(err, class_error_code(err))
}

pub(crate) fn error_response_with_code(err: &ClassHubError, code: ErrorCode) -> HttpResponse {
    let status = status_for(err);
    // 服务端错误不向客户端暴露内部细节
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
        "Internal server error".to_string()
    } else {
        err.message().to_string()
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::models::auth::Identity;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    pub async fn setup() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::connect_in_memory().await.unwrap())
    }

    pub async fn seed_identity(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> Identity {
        let user = storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "hashed".to_string(),
                role: role.clone(),
                display_name: None,
                birth_date: None,
            })
            .await
            .unwrap();
        Identity::new(user.id, role)
    }
}
