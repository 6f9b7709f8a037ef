use super::entities::UserRole;
use serde::Deserialize;

// 用户注册请求
//
// 进入存储层前 `password` 会被替换为 argon2 哈希。
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    /// 出生日期，格式 YYYY-MM-DD
    pub birth_date: Option<String>,
}
