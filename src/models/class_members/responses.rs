use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserSummary;

/// 班级成员响应：教师与学生摘要，不含任何凭据
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassMembersResponse {
    pub class_id: i64,
    pub teacher: UserSummary,
    pub students: Vec<UserSummary>,
}
