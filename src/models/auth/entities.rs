use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserRole;

/// 身份断言
///
/// 由 `RequireJWT` 从已验证的 Bearer token 中解析得到，并存入请求扩展。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub role: UserRole,
}

impl Identity {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }
}
