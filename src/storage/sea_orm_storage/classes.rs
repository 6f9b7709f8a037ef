//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::class_members::{
    Column as MemberColumn, Entity as ClassMembers, Relation as MemberRelation,
};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{ClassHubError, Result};
use crate::models::classes::{entities::Class, requests::UpdateClassRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级
    ///
    /// 邀请码由调用方生成，唯一索引冲突时返回 `Conflict`。
    pub async fn create_class_impl(&self, teacher_id: i64, name: &str, code: &str) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(ClassHubError::from)?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过邀请码获取班级
    pub async fn get_class_by_code_impl(&self, code: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 邀请码是否已存在
    pub async fn class_code_exists_impl(&self, code: &str) -> Result<bool> {
        let count = Classes::find()
            .filter(Column::Code.eq(code))
            .count(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(count > 0)
    }

    /// 列出教师创建的班级，新建在前
    pub async fn list_classes_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Class>> {
        let classes = Classes::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 列出用户加入的班级，新建在前
    pub async fn list_classes_by_member_impl(&self, user_id: i64) -> Result<Vec<Class>> {
        let classes = Classes::find()
            .join_rev(JoinType::InnerJoin, MemberRelation::Class.def())
            .filter(MemberColumn::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        let existing = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        // 无字段变化时直接返回原记录
        let Some(name) = update.name else {
            return Ok(Some(existing.into_class()));
        };

        // 按行数判断，读取之后被并发删除的班级视为不存在
        let result = Classes::update_many()
            .col_expr(Column::Name, sea_orm::sea_query::Expr::value(name))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级及其成员关系
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self.db.begin().await.map_err(ClassHubError::from)?;

        ClassMembers::delete_many()
            .filter(MemberColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(ClassHubError::from)?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(ClassHubError::from)?;

        txn.commit().await.map_err(ClassHubError::from)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ClassHubError;
    use crate::models::classes::requests::UpdateClassRequest;
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
    async fn test_create_and_find_class() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;

        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();
        assert_eq!(class.teacher_id, teacher);

        let found = storage.get_class_by_code("ABC123").await.unwrap().unwrap();
        assert_eq!(found.id, class.id);
        assert!(storage.class_code_exists("ABC123").await.unwrap());
        assert!(!storage.class_code_exists("ZZZ999").await.unwrap());
    }

    #[actix_web::test]
    async fn test_duplicate_code_is_conflict() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;

        storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();
        let err = storage
            .create_class(teacher, "Geometry", "ABC123")
            .await
            .unwrap_err();
        assert!(matches!(err, ClassHubError::Conflict(_)));
    }

    #[actix_web::test]
    async fn test_update_class() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();

        let unchanged = storage
            .update_class(class.id, UpdateClassRequest::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.name, "Algebra");

        let renamed = storage
            .update_class(
                class.id,
                UpdateClassRequest {
                    name: Some("Algebra II".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Algebra II");
        assert_eq!(renamed.code, "ABC123");

        assert!(
            storage
                .update_class(999, UpdateClassRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_rename_of_missing_class_is_none() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();
        assert!(storage.delete_class(class.id).await.unwrap());

        let renamed = storage
            .update_class(
                class.id,
                UpdateClassRequest {
                    name: Some("Algebra II".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(renamed.is_none());
    }

    #[actix_web::test]
    async fn test_delete_class_detaches_members() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_user(&storage, "student1", UserRole::Student).await;
        let class = storage
            .create_class(teacher, "Algebra", "ABC123")
            .await
            .unwrap();
        storage.add_class_member(class.id, student).await.unwrap();

        assert!(storage.delete_class(class.id).await.unwrap());
        assert!(storage.get_class_by_id(class.id).await.unwrap().is_none());
        assert!(storage.list_classes_by_member(student).await.unwrap().is_empty());
        assert!(!storage.delete_class(class.id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_list_classes_by_teacher_and_member() {
        let storage = SeaOrmStorage::connect_in_memory().await.unwrap();
        let teacher = seed_user(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_user(&storage, "student1", UserRole::Student).await;

        let first = storage
            .create_class(teacher, "Algebra", "AAA111")
            .await
            .unwrap();
        let second = storage
            .create_class(teacher, "Geometry", "BBB222")
            .await
            .unwrap();
        storage.add_class_member(second.id, student).await.unwrap();

        let owned = storage.list_classes_by_teacher(teacher).await.unwrap();
        assert_eq!(
            owned.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );

        let joined = storage.list_classes_by_member(student).await.unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].id, second.id);
    }
}
