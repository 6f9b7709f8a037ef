use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{MaterialService, error_response};
use crate::errors::{ClassHubError, Result};
use crate::models::ApiResponse;
use crate::models::auth::Identity;
use crate::models::materials::{entities::Material, requests::UpdateMaterialRequest};
use crate::services::classes::policy::{ClassAction, authorize};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::validate::{normalize_document_link, normalize_title, require_text};

/// 部分更新资料，仅班级所有者可操作
pub async fn update_material(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    material_id: i64,
    update: UpdateMaterialRequest,
) -> Result<Material> {
    let material = storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Material not found"))?;
    let class = storage
        .get_class_by_id(material.class_id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Material not found"))?;

    authorize(identity, ClassAction::ManageCoursework(&class))?;

    let update = UpdateMaterialRequest {
        title: update.title.as_deref().map(normalize_title).transpose()?,
        description: update
            .description
            .as_deref()
            .map(|d| require_text("Description", d))
            .transpose()?,
        document_link: update
            .document_link
            .as_deref()
            .map(normalize_document_link)
            .transpose()?,
    };

    storage
        .update_material(material_id, update)
        .await?
        .ok_or_else(|| ClassHubError::not_found("Material not found"))
}

pub async fn handle_update_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    update_data: UpdateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match update_material(&storage, &identity, material_id, update_data).await {
        Ok(material) => {
            info!("Material {} updated by {}", material.id, identity.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(material, "Material updated successfully")))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::classes::create::create_class;
    use crate::services::classes::testing::{seed_identity, setup};
    use crate::services::materials::create::{create_material, tests::slides};

    #[actix_web::test]
    async fn test_partial_update() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        let material = create_material(&storage, &teacher, class.id, slides("Week 1"))
            .await
            .unwrap();

        let updated = update_material(
            &storage,
            &teacher,
            material.id,
            UpdateMaterialRequest {
                document_link: Some("https://docs.example.com/v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.document_link, "https://docs.example.com/v2");
        assert_eq!(updated.title, "Week 1");
    }

    #[actix_web::test]
    async fn test_update_rules() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;
        let class = create_class(&storage, &teacher, "Algebra").await.unwrap();
        let material = create_material(&storage, &teacher, class.id, slides("Week 1"))
            .await
            .unwrap();

        assert!(matches!(
            update_material(&storage, &student, material.id, UpdateMaterialRequest::default()).await,
            Err(ClassHubError::Forbidden(_))
        ));
        assert!(matches!(
            update_material(
                &storage,
                &teacher,
                material.id,
                UpdateMaterialRequest {
                    title: Some(" ".to_string()),
                    ..Default::default()
                }
            )
            .await,
            Err(ClassHubError::Validation(_))
        ));
        assert!(matches!(
            update_material(&storage, &teacher, 999, UpdateMaterialRequest::default()).await,
            Err(ClassHubError::NotFound(_))
        ));
    }
}
