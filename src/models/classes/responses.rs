use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserSummary;

// 班级邀请码响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassCodeResponse {
    pub class_id: i64,
    pub code: String,
}

// 加入班级响应
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinClassResponse {
    pub class_id: i64,
}

// 班级列表项，附带教师名称与成员数量
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassSummary {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub member_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 班级详情
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassDetailResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub teacher: UserSummary,
    pub member_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
