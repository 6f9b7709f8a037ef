//! 课程资料
//!
//! 增删改仅限班级所有者，读取对所有已认证用户开放。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ClassHubError;
use crate::models::ErrorCode;
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::services::classes::error_response_with_code;
use crate::storage::Storage;

use super::storage_from_request;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    // 为班级添加资料
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        class_id: i64,
        material_data: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::handle_create_material(self, request, class_id, material_data).await
    }

    // 班级资料列表
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::handle_list_materials(self, request, class_id).await
    }

    // 资料详情
    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::handle_get_material(self, request, material_id).await
    }

    // 更新资料
    pub async fn update_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
        update_data: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_material(self, request, material_id, update_data).await
    }

    // 删除资料
    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete_material(self, request, material_id).await
    }
}

fn material_error_code(err: &ClassHubError) -> ErrorCode {
    match err {
        ClassHubError::Validation(_) => ErrorCode::MaterialInvalid,
        ClassHubError::NotFound(_) => ErrorCode::MaterialNotFound,
        ClassHubError::Forbidden(_) => ErrorCode::ClassPermissionDenied,
        ClassHubError::Unavailable(_) | ClassHubError::DatabaseConnection(_) => {
            ErrorCode::StorageUnavailable
        }
        _ => ErrorCode::InternalServerError,
    }
}

pub(crate) fn error_response(err: &ClassHubError) -> HttpResponse {
    error_response_with_code(err, material_error_code(err))
}
