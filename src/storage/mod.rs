use std::sync::Arc;

use crate::models::{
    achievements::entities::Achievement,
    assignments::{
        entities::{Assignment, Submission},
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    class_members::entities::ClassMember,
    classes::{entities::Class, requests::UpdateClassRequest},
    materials::{
        entities::Material,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须为哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户信息
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;

    /// 班级管理方法
    // 创建班级，邀请码冲突时返回 Conflict
    async fn create_class(&self, teacher_id: i64, name: &str, code: &str) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过邀请码获取班级信息
    async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>>;
    // 邀请码是否已被占用
    async fn class_code_exists(&self, code: &str) -> Result<bool>;
    // 列出教师创建的班级
    async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<Class>>;
    // 列出用户加入的班级
    async fn list_classes_by_member(&self, user_id: i64) -> Result<Vec<Class>>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级，成员关系随之级联删除
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 班级成员管理方法
    // 原子地加入成员集合，重复加入返回 AlreadyMember
    async fn add_class_member(&self, class_id: i64, user_id: i64) -> Result<ClassMember>;
    // 原子地移出成员集合，返回是否确有移除
    async fn remove_class_member(&self, class_id: i64, user_id: i64) -> Result<bool>;
    // 是否为班级成员
    async fn is_class_member(&self, class_id: i64, user_id: i64) -> Result<bool>;
    // 列出班级学生，按加入时间排序
    async fn list_class_members(&self, class_id: i64) -> Result<Vec<User>>;
    // 统计班级成员数量
    async fn count_class_members(&self, class_id: i64) -> Result<i64>;
    // 学生是否在该教师的任一班级中
    async fn teaches_student(&self, teacher_id: i64, student_id: i64) -> Result<bool>;

    /// 课程资料管理方法（字段须已校验）
    // 创建资料，班级不存在返回 NotFound
    async fn create_material(
        &self,
        class_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material>;
    // 通过ID获取资料
    async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>>;
    // 列出班级资料，按创建顺序
    async fn list_materials_by_class(&self, class_id: i64) -> Result<Vec<Material>>;
    // 更新资料
    async fn update_material(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>>;
    // 删除资料
    async fn delete_material(&self, material_id: i64) -> Result<bool>;

    /// 作业管理方法（字段须已校验）
    // 创建作业，班级不存在返回 NotFound
    async fn create_assignment(
        &self,
        class_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出班级作业，按创建顺序
    async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业，提交随之级联删除
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 提交答案，重复提交返回 AlreadySubmitted
    async fn create_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        document_link: &str,
    ) -> Result<Submission>;
    // 列出作业的全部提交，按提交时间排序
    async fn list_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>>;

    /// 学生成就方法
    // 列出学生成就，按标题排序
    async fn list_achievements_by_student(&self, student_id: i64) -> Result<Vec<Achievement>>;
    // 按 (student_id, title) 写入或覆盖成就
    async fn upsert_achievement(
        &self,
        student_id: i64,
        title: &str,
        progress: i32,
        completed: bool,
    ) -> Result<Achievement>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
