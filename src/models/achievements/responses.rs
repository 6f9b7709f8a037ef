use serde::{Deserialize, Serialize};

use super::entities::Achievement;

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentAchievementsResponse {
    pub student_id: i64,
    pub achievements: Vec<Achievement>,
}
