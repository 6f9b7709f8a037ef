//! 学生成就存储操作

use super::SeaOrmStorage;
use crate::entity::achievements::Column;
use crate::entity::prelude::{AchievementActiveModel, Achievements};
use crate::errors::{ClassHubError, Result};
use crate::models::achievements::entities::Achievement;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};

impl SeaOrmStorage {
    /// 列出学生成就
    pub async fn list_achievements_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Achievement>> {
        let achievements = Achievements::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(achievements.into_iter().map(|m| m.into_achievement()).collect())
    }

    /// 写入成就，同名成就覆盖进度与完成状态
    pub async fn upsert_achievement_impl(
        &self,
        student_id: i64,
        title: &str,
        progress: i32,
        completed: bool,
    ) -> Result<Achievement> {
        let model = AchievementActiveModel {
            student_id: Set(student_id),
            title: Set(title.to_string()),
            progress: Set(progress),
            completed: Set(completed),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Achievements::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::Title])
                    .update_columns([Column::Progress, Column::Completed, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    ClassHubError::not_found("Student not found")
                }
                _ => ClassHubError::from(e),
            })?;

        let stored = Achievements::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(ClassHubError::from)?
            .ok_or_else(|| ClassHubError::not_found("Achievement not found"))?;

        Ok(stored.into_achievement())
    }
}
