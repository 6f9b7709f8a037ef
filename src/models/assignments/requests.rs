use chrono::{DateTime, Utc};
use serde::Deserialize;

// 创建作业请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub document_link: String,
    pub deadline: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
}

// 更新作业请求，缺省字段保持不变
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub document_link: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl UpdateAssignmentRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.instructions.is_none()
            && self.document_link.is_none()
            && self.deadline.is_none()
    }
}

// 提交答案请求
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub document_link: String,
}
