//! 路径参数安全提取
//!
//! 非法的路径参数直接返回 400 与统一响应体，而不是 actix 默认的纯文本错误。

use actix_web::{HttpRequest, HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

/// 解析 i64 路径参数，失败时生成 400 响应
pub fn parse_i64_path_param(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| {
        let message = format!("Invalid path parameter '{name}': {raw}");
        let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            message.clone(),
        ));
        InternalError::from_response(message, response).into()
    })
}

/// 定义一个从路径中提取 i64 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_i64_path_param(req, $param).map($name),
                )
            }
        }
    };
}

define_safe_i64_extractor!(SafeClassIdI64, "class_id");
define_safe_i64_extractor!(SafeMaterialIdI64, "material_id");
define_safe_i64_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
