//! 班级成员关联存储操作
//!
//! 加入与退出均为单条语句：加入依赖 `(class_id, user_id)` 唯一索引，
//! 退出以受影响行数判断是否原本为成员。

use super::SeaOrmStorage;
use crate::entity::class_members::{ActiveModel, Column, Entity as ClassMembers, Relation};
use crate::entity::classes::Column as ClassColumn;
use crate::entity::users::Entity as Users;
use crate::errors::{ClassHubError, Result};
use crate::models::{class_members::entities::ClassMember, users::entities::User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 加入班级
    pub async fn add_class_member_impl(&self, class_id: i64, user_id: i64) -> Result<ClassMember> {
        let model = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ClassHubError::already_member("User is already a member of this class")
            }
            // 班级在检查之后被删除
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                ClassHubError::not_found("Class not found")
            }
            _ => ClassHubError::from(e),
        })?;

        Ok(result.into_class_member())
    }

    /// 退出班级
    pub async fn remove_class_member_impl(&self, class_id: i64, user_id: i64) -> Result<bool> {
        let result = ClassMembers::delete_many()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .exec(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.rows_affected > 0)
    }

    /// 是否为班级成员
    pub async fn is_class_member_impl(&self, class_id: i64, user_id: i64) -> Result<bool> {
        let count = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(count > 0)
    }

    /// 列出班级学生，按加入顺序
    pub async fn list_class_members_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let rows = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::JoinedAt)
            .order_by_asc(Column::Id)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, user)| user.map(|u| u.into_user()))
            .collect())
    }

    /// 获取班级成员数量
    pub async fn count_class_members_impl(&self, class_id: i64) -> Result<i64> {
        let count = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(count as i64)
    }

    /// 学生是否加入了该教师的任一班级
    pub async fn teaches_student_impl(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        let count = ClassMembers::find()
            .join(JoinType::InnerJoin, Relation::Class.def())
            .filter(Column::UserId.eq(student_id))
            .filter(ClassColumn::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ClassHubError;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> i64 {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "hashed".to_string(),
                role,
                display_name: None,
                birth_date: None,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_add_member_twice_is_already_member() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_user(&storage, "student1", UserRole::Student).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();

        let member = storage.add_class_member(class.id, student).await.unwrap();
        assert_eq!(member.user_id, student);

        let err = storage
            .add_class_member(class.id, student)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassHubError::AlreadyMember(_)));
        assert_eq!(storage.count_class_members(class.id).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_add_member_to_missing_class_is_not_found() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let student = seed_user(&storage, "student1", UserRole::Student).await;

        let err = storage.add_class_member(999, student).await.unwrap_err();
        assert!(matches!(err, ClassHubError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_remove_member_reports_whether_removed() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_user(&storage, "student1", UserRole::Student).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();

        storage.add_class_member(class.id, student).await.unwrap();
        assert!(storage.is_class_member(class.id, student).await.unwrap());
        assert!(storage.remove_class_member(class.id, student).await.unwrap());
        assert!(!storage.remove_class_member(class.id, student).await.unwrap());
        assert!(!storage.is_class_member(class.id, student).await.unwrap());
    }

    #[actix_web::test]
    async fn test_list_members_in_join_order() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let alice = seed_user(&storage, "alice1", UserRole::Student).await;
        let bob = seed_user(&storage, "bob111", UserRole::Student).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();

        storage.add_class_member(class.id, bob).await.unwrap();
        storage.add_class_member(class.id, alice).await.unwrap();

        let members = storage.list_class_members(class.id).await.unwrap();
        assert_eq!(
            members.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![bob, alice]
        );
        assert_eq!(storage.count_class_members(class.id).await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn test_teaches_student_follows_membership() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let other = seed_user(&storage, "teacher2", UserRole::Teacher).await;
        let student = seed_user(&storage, "student1", UserRole::Student).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();

        assert!(!storage.teaches_student(teacher, student).await.unwrap());
        storage.add_class_member(class.id, student).await.unwrap();
        assert!(storage.teaches_student(teacher, student).await.unwrap());
        assert!(!storage.teaches_student(other, student).await.unwrap());
    }
}
