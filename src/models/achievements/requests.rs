use serde::Deserialize;

// 记录成就请求，同名成就覆盖进度
#[derive(Debug, Deserialize)]
pub struct RecordAchievementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub progress: i32,
    // 缺省时进度达到 100 即视为完成
    pub completed: Option<bool>,
}

impl RecordAchievementRequest {
    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(self.progress >= 100)
    }
}
