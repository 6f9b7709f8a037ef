use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::ClassHubError;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::services::status_for;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_birth_date, validate_email, validate_password, validate_username,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    create_request.username = create_request.username.trim().to_string();
    create_request.email = create_request.email.trim().to_lowercase();
    create_request.display_name = create_request
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    // 1. 校验输入
    if let Err(response) = validate_request(&mut create_request) {
        return Ok(response);
    }

    // 2. 检查用户名与邮箱是否已存在
    if let Err(response) = check_username_exists(&storage, &create_request.username).await {
        return Ok(response);
    }
    if let Err(response) = check_email_exists(&storage, &create_request.email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    // 4. 创建用户，并发注册的唯一冲突同样返回 409
    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("User {} registered as {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Registered successfully",
            )))
        }
        Err(ClassHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::Conflict, "Username or email already exists"),
        )),
        Err(e) => {
            error!("Register failed: {}", e);
            Ok(HttpResponse::build(status_for(&e)).json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "Register failed",
            )))
        }
    }
}

// 校验用户名、邮箱、密码与出生日期，出生日期统一为 YYYY-MM-DD
fn validate_request(create_request: &mut CreateUserRequest) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_username(&create_request.username) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_email(&create_request.email) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let password_check = validate_password(&create_request.password);
    if !password_check.is_valid {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            password_check.error_message(),
        )));
    }

    if let Some(raw) = create_request.birth_date.take() {
        match validate_birth_date(&raw) {
            Ok(date) => create_request.birth_date = Some(date.format("%Y-%m-%d").to_string()),
            Err(e) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserBirthDateInvalid,
                    format!("Invalid birth date: {}", e.message()),
                )));
            }
        }
    }

    Ok(())
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Register lookup failed: {}", e);
            Err(HttpResponse::build(status_for(&e)).json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "Register failed",
            )))
        }
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => {
            error!("Register lookup failed: {}", e);
            Err(HttpResponse::build(status_for(&e)).json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "Register failed",
            )))
        }
    }
}
