//! 作业与答案提交
//!
//! 作业的增删改仅限班级所有者；提交仅限班级学生，且每人一次。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ClassHubError;
use crate::models::ErrorCode;
use crate::models::assignments::requests::{
    CreateAssignmentRequest, SubmitAnswerRequest, UpdateAssignmentRequest,
};
use crate::services::classes::error_response_with_code;
use crate::storage::Storage;

use super::storage_from_request;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 为班级布置作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_assignment(self, request, class_id, assignment_data).await
    }

    // 班级作业列表
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_assignments(self, request, class_id).await
    }

    // 作业详情
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_assignment(self, request, assignment_id).await
    }

    // 更新作业
    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_assignment(self, request, assignment_id, update_data).await
    }

    // 删除作业
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_assignment(self, request, assignment_id).await
    }

    // 提交答案
    pub async fn submit_answer(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        answer: SubmitAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit_answer(self, request, assignment_id, answer).await
    }
}

fn assignment_error_code(err: &ClassHubError) -> ErrorCode {
    match err {
        ClassHubError::Validation(_) => ErrorCode::AssignmentInvalid,
        ClassHubError::NotFound(_) => ErrorCode::AssignmentNotFound,
        ClassHubError::AlreadySubmitted(_) => ErrorCode::AssignmentAlreadySubmitted,
        ClassHubError::Forbidden(_) => ErrorCode::AssignmentPermissionDenied,
        ClassHubError::Unavailable(_) | ClassHubError::DatabaseConnection(_) => {
            ErrorCode::StorageUnavailable
        }
        _ => ErrorCode::InternalServerError,
    }
}

pub(crate) fn error_response(err: &ClassHubError) -> HttpResponse {
    error_response_with_code(err, assignment_error_code(err))
}
