use serde::{Deserialize, Serialize};

// 课程资料，随班级删除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub class_id: i64,
    pub title: String,
    pub description: String,
    pub document_link: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
