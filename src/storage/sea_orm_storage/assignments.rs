//! 作业与提交存储操作
//!
//! 提交依赖 `(assignment_id, student_id)` 唯一索引保证每名学生只提交一次。

use super::SeaOrmStorage;
use crate::entity::assignment_submissions::Column as SubmissionColumn;
use crate::entity::assignments::Column;
use crate::entity::prelude::{
    AssignmentActiveModel, AssignmentSubmissions, Assignments, SubmissionActiveModel,
};
use crate::errors::{ClassHubError, Result};
use crate::models::assignments::{
    entities::{Assignment, Submission},
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        class_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = AssignmentActiveModel {
            class_id: Set(class_id),
            title: Set(assignment.title),
            instructions: Set(assignment.instructions),
            document_link: Set(assignment.document_link),
            deadline: Set(assignment.deadline.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                ClassHubError::not_found("Class not found")
            }
            _ => ClassHubError::from(e),
        })?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出班级作业
    pub async fn list_assignments_by_class_impl(&self, class_id: i64) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 更新作业，只写入提供的字段
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = self.get_assignment_by_id_impl(assignment_id).await? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(existing));
        }

        let mut model = AssignmentActiveModel {
            id: Set(assignment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(instructions) = update.instructions {
            model.instructions = Set(instructions);
        }

        if let Some(document_link) = update.document_link {
            model.document_link = Set(document_link);
        }

        if let Some(deadline) = update.deadline {
            model.deadline = Set(Some(deadline.timestamp()));
        }

        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into_assignment())),
            // 读取之后被并发删除
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ClassHubError::from(e)),
        }
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.rows_affected > 0)
    }

    /// 提交答案
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        document_link: &str,
    ) -> Result<Submission> {
        let model = SubmissionActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            document_link: Set(document_link.to_string()),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ClassHubError::already_submitted("Answer already submitted for this assignment")
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                ClassHubError::not_found("Assignment not found")
            }
            _ => ClassHubError::from(e),
        })?;

        Ok(result.into_submission())
    }

    /// 列出作业的提交
    pub async fn list_submissions_impl(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        let submissions = AssignmentSubmissions::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(SubmissionColumn::SubmittedAt)
            .order_by_asc(SubmissionColumn::Id)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }
}
