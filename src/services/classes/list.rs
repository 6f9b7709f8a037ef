use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::{ClassService, error_response, error_response_with_code};
use crate::errors::{ClassHubError, Result};
use crate::models::auth::Identity;
use crate::models::classes::{entities::Class, responses::ClassSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_identity;
use crate::storage::Storage;

/// 当前教师创建的班级，为空时返回 `NotFound`
pub async fn list_teacher_classes(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
) -> Result<Vec<ClassSummary>> {
    let classes = storage.list_classes_by_teacher(identity.user_id).await?;
    if classes.is_empty() {
        return Err(ClassHubError::not_found("No classes created yet"));
    }
    summarize(storage, classes).await
}

/// 当前用户加入的班级，为空时返回 `NotFound`
pub async fn list_joined_classes(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
) -> Result<Vec<ClassSummary>> {
    let classes = storage.list_classes_by_member(identity.user_id).await?;
    if classes.is_empty() {
        return Err(ClassHubError::not_found("No classes joined yet"));
    }
    summarize(storage, classes).await
}

// 附加教师展示名称与成员数量
async fn summarize(storage: &Arc<dyn Storage>, classes: Vec<Class>) -> Result<Vec<ClassSummary>> {
    let mut teacher_ids: Vec<i64> = classes.iter().map(|c| c.teacher_id).collect();
    teacher_ids.sort_unstable();
    teacher_ids.dedup();

    let teacher_names: HashMap<i64, String> = storage
        .get_users_by_ids(&teacher_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.display_name().to_string()))
        .collect();

    let mut summaries = Vec::with_capacity(classes.len());
    for class in classes {
        let member_count = storage.count_class_members(class.id).await?;
        summaries.push(ClassSummary {
            teacher_name: teacher_names
                .get(&class.teacher_id)
                .cloned()
                .unwrap_or_default(),
            id: class.id,
            name: class.name,
            code: class.code,
            teacher_id: class.teacher_id,
            member_count,
            created_at: class.created_at,
        });
    }
    Ok(summaries)
}

fn list_error_response(err: &ClassHubError) -> HttpResponse {
    match err {
        ClassHubError::NotFound(_) => error_response_with_code(err, ErrorCode::ClassListEmpty),
        _ => error_response(err),
    }
}

pub async fn handle_list_teacher_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match list_teacher_classes(&storage, &identity).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "Classes retrieved"))),
        Err(e) => Ok(list_error_response(&e)),
    }
}

pub async fn handle_list_joined_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match list_joined_classes(&storage, &identity).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "Classes retrieved"))),
        Err(e) => Ok(list_error_response(&e)),
    }
}
