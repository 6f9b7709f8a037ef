//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::Column;
use crate::entity::prelude::{MaterialActiveModel, Materials};
use crate::errors::{ClassHubError, Result};
use crate::models::materials::{
    entities::Material,
    requests::{CreateMaterialRequest, UpdateMaterialRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建资料
    pub async fn create_material_impl(
        &self,
        class_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = MaterialActiveModel {
            class_id: Set(class_id),
            title: Set(material.title),
            description: Set(material.description),
            document_link: Set(material.document_link),
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

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出班级资料
    pub async fn list_materials_by_class_impl(&self, class_id: i64) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新资料，只写入提供的字段
    pub async fn update_material_impl(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        let Some(existing) = self.get_material_by_id_impl(material_id).await? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(existing));
        }

        let mut model = MaterialActiveModel {
            id: Set(material_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(document_link) = update.document_link {
            model.document_link = Set(document_link);
        }

        match model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into_material())),
            // 读取之后被并发删除
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ClassHubError::from(e)),
        }
    }

    /// 删除资料
    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(ClassHubError::from)?;

        Ok(result.rows_affected > 0)
    }
}
