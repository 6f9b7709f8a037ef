use serde::{Deserialize, Serialize};

// 学生成就，按标题唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    // 完成百分比，0..=100
    pub progress: i32,
    pub completed: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
