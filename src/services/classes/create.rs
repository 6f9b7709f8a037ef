use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{info, warn};

use super::code_generator::{AttemptBudget, CLASS_CODE_LENGTH, generate_unique_code};
use super::policy::{ClassAction, authorize};
use super::{ClassService, error_response, error_response_with_code};
use crate::config::AppConfig;
use crate::errors::{ClassHubError, Result};
use crate::models::{ApiResponse, ErrorCode};
use crate::models::auth::Identity;
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::services::require_identity;
use crate::storage::Storage;
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::normalize_class_name;

/// 创建班级，邀请码在插入时冲突则重新生成
pub async fn create_class(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    name: &str,
) -> Result<Class> {
    let max_attempts = AppConfig::get().classes.code_max_attempts;
    create_class_with(storage, identity, name, max_attempts, || {
        generate_random_code(CLASS_CODE_LENGTH)
    })
    .await
}

/// 存在性检查与插入冲突共用 `max_attempts` 次尝试
pub(crate) async fn create_class_with<F>(
    storage: &Arc<dyn Storage>,
    identity: &Identity,
    name: &str,
    max_attempts: usize,
    mut candidate: F,
) -> Result<Class>
where
    F: FnMut() -> String,
{
    authorize(identity, ClassAction::Create)?;
    let name = normalize_class_name(name)?;

    let mut budget = AttemptBudget::new(max_attempts);
    loop {
        // 预算耗尽时在此返回 Conflict
        let code = generate_unique_code(storage, &mut budget, &mut candidate).await?;
        match storage.create_class(identity.user_id, &name, &code).await {
            Ok(class) => return Ok(class),
            Err(ClassHubError::Conflict(msg)) => {
                warn!(
                    "Class code {} taken between check and insert (attempt {}): {}",
                    code,
                    budget.used(),
                    msg
                );
            }
            Err(e) => return Err(e),
        }
    }
}

pub async fn handle_create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let identity = match require_identity(request) {
        Ok(identity) => identity,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match create_class(&storage, &identity, &class_data.name).await {
        Ok(class) => {
            info!(
                "Class {} ({}) created by teacher {}",
                class.id, class.code, identity.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e @ ClassHubError::Validation(_)) => {
            Ok(error_response_with_code(&e, ErrorCode::ClassNameInvalid))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::achievements::entities::Achievement;
    use crate::models::assignments::{
        entities::{Assignment, Submission},
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    };
    use crate::models::class_members::entities::ClassMember;
    use crate::models::classes::requests::UpdateClassRequest;
    use crate::models::materials::{
        entities::Material,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
    };
    use crate::models::users::{entities::{User, UserRole}, requests::CreateUserRequest};
    use crate::services::classes::testing::{seed_identity, setup};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[actix_web::test]
    async fn test_create_class_assigns_owner_and_code() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;

        let class = create_class(&storage, &teacher, "  Algebra ").await.unwrap();
        assert_eq!(class.name, "Algebra");
        assert_eq!(class.teacher_id, teacher.user_id);
        assert_eq!(class.code.len(), 6);
        assert!(class.code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_eq!(storage.count_class_members(class.id).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_blank_name_is_validation_error() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;

        let err = create_class(&storage, &teacher, "   ").await.unwrap_err();
        assert!(matches!(err, ClassHubError::Validation(_)));
    }

    #[actix_web::test]
    async fn test_student_cannot_create() {
        let storage = setup().await;
        let student = seed_identity(&storage, "student1", UserRole::Student).await;

        let err = create_class(&storage, &student, "Algebra").await.unwrap_err();
        assert!(matches!(err, ClassHubError::Forbidden(_)));
    }

    #[actix_web::test]
    async fn test_codes_never_repeat() {
        let storage = setup().await;
        let teacher = seed_identity(&storage, "teacher1", UserRole::Teacher).await;

        let first = create_class_with(&storage, &teacher, "Algebra", 4, || "AAAAAA".to_string())
            .await
            .unwrap();
        let mut candidates = vec!["AAAAAA", "BBBBBB"].into_iter();
        let second = create_class_with(&storage, &teacher, "Geometry", 4, || {
            candidates.next().unwrap_or("CCCCCC").to_string()
        })
        .await
        .unwrap();

        assert_eq!(first.code, "AAAAAA");
        assert_eq!(second.code, "BBBBBB");
    }

    /// 邀请码存在性检查恒返回 false，其余操作委托给内层存储，
    /// 用于让冲突只在插入时暴露
    struct BlindCodeStorage {
        inner: Arc<dyn Storage>,
        code_checks: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Storage for BlindCodeStorage {
        async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
            self.inner.create_user(user).await
        }
        async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
            self.inner.get_user_by_id(id).await
        }
        async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
            self.inner.get_users_by_ids(ids).await
        }
        async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
            self.inner.get_user_by_username(username).await
        }
        async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
            self.inner.get_user_by_email(email).await
        }
        async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
            self.inner.get_user_by_username_or_email(identifier).await
        }
        async fn create_class(&self, teacher_id: i64, name: &str, code: &str) -> Result<Class> {
            self.inner.create_class(teacher_id, name, code).await
        }
        async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
            self.inner.get_class_by_id(class_id).await
        }
        async fn get_class_by_code(&self, code: &str) -> Result<Option<Class>> {
            self.inner.get_class_by_code(code).await
        }
        async fn class_code_exists(&self, _code: &str) -> Result<bool> {
            self.code_checks.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
        async fn list_classes_by_teacher(&self, teacher_id: i64) -> Result<Vec<Class>> {
            self.inner.list_classes_by_teacher(teacher_id).await
        }
        async fn list_classes_by_member(&self, user_id: i64) -> Result<Vec<Class>> {
            self.inner.list_classes_by_member(user_id).await
        }
        async fn update_class(&self, class_id: i64, update: UpdateClassRequest) -> Result<Option<Class>> {
            self.inner.update_class(class_id, update).await
        }
        async fn delete_class(&self, class_id: i64) -> Result<bool> {
            self.inner.delete_class(class_id).await
        }
        async fn add_class_member(&self, class_id: i64, user_id: i64) -> Result<ClassMember> {
            self.inner.add_class_member(class_id, user_id).await
        }
        async fn remove_class_member(&self, class_id: i64, user_id: i64) -> Result<bool> {
            self.inner.remove_class_member(class_id, user_id).await
        }
        async fn is_class_member(&self, class_id: i64, user_id: i64) -> Result<bool> {
            self.inner.is_class_member(class_id, user_id).await
        }
        async fn list_class_members(&self, class_id: i64) -> Result<Vec<User>> {
            self.inner.list_class_members(class_id).await
        }
        async fn count_class_members(&self, class_id: i64) -> Result<i64> {
            self.inner.count_class_members(class_id).await
        }
        async fn teaches_student(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
            self.inner.teaches_student(teacher_id, student_id).await
        }
        async fn create_material(
            &self,
            class_id: i64,
            material: CreateMaterialRequest,
        ) -> Result<Material> {
            self.inner.create_material(class_id, material).await
        }
        async fn get_material_by_id(&self, material_id: i64) -> Result<Option<Material>> {
            self.inner.get_material_by_id(material_id).await
        }
        async fn list_materials_by_class(&self, class_id: i64) -> Result<Vec<Material>> {
            self.inner.list_materials_by_class(class_id).await
        }
        async fn update_material(
            &self,
            material_id: i64,
            update: UpdateMaterialRequest,
        ) -> Result<Option<Material>> {
            self.inner.update_material(material_id, update).await
        }
        async fn delete_material(&self, material_id: i64) -> Result<bool> {
            self.inner.delete_material(material_id).await
        }
        async fn create_assignment(
            &self,
            class_id: i64,
            assignment: CreateAssignmentRequest,
        ) -> Result<Assignment> {
            self.inner.create_assignment(class_id, assignment).await
        }
        async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
            self.inner.get_assignment_by_id(assignment_id).await
        }
        async fn list_assignments_by_class(&self, class_id: i64) -> Result<Vec<Assignment>> {
            self.inner.list_assignments_by_class(class_id).await
        }
        async fn update_assignment(
            &self,
            assignment_id: i64,
            update: UpdateAssignmentRequest,
        ) -> Result<Option<Assignment>> {
            self.inner.update_assignment(assignment_id, update).await
        }
        async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
            self.inner.delete_assignment(assignment_id).await
        }
        async fn create_submission(
            &self,
            assignment_id: i64,
            student_id: i64,
            document_link: &str,
        ) -> Result<Submission> {
            self.inner
                .create_submission(assignment_id, student_id, document_link)
                .await
        }
        async fn list_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>> {
            self.inner.list_submissions(assignment_id).await
        }
        async fn list_achievements_by_student(&self, student_id: i64) -> Result<Vec<Achievement>> {
            self.inner.list_achievements_by_student(student_id).await
        }
        async fn upsert_achievement(
            &self,
            student_id: i64,
            title: &str,
            progress: i32,
            completed: bool,
        ) -> Result<Achievement> {
            self.inner
                .upsert_achievement(student_id, title, progress, completed)
                .await
        }
    }

    async fn blind_storage() -> (Arc<BlindCodeStorage>, Arc<dyn Storage>, Identity) {
        let inner = setup().await;
        let teacher = seed_identity(&inner, "teacher1", UserRole::Teacher).await;
        inner
            .create_class(teacher.user_id, "Algebra", "AAAAAA")
            .await
            .unwrap();
        let blind = Arc::new(BlindCodeStorage {
            inner,
            code_checks: AtomicUsize::new(0),
        });
        let storage: Arc<dyn Storage> = blind.clone();
        (blind, storage, teacher)
    }

    #[actix_web::test]
    async fn test_insert_conflict_retries_with_next_code() {
        let (blind, storage, teacher) = blind_storage().await;

        let mut candidates = vec!["AAAAAA", "BBBBBB"].into_iter();
        let class = create_class_with(&storage, &teacher, "Geometry", 4, || {
            candidates.next().unwrap_or("ZZZZZZ").to_string()
        })
        .await
        .unwrap();

        assert_eq!(class.code, "BBBBBB");
        assert_eq!(blind.code_checks.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_insert_conflicts_exhaust_shared_budget() {
        let (blind, storage, teacher) = blind_storage().await;

        let err = create_class_with(&storage, &teacher, "Geometry", 3, || "AAAAAA".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ClassHubError::Conflict(_)));
        // 每个候选码只检查一次，总次数不超过预算
        assert_eq!(blind.code_checks.load(Ordering::SeqCst), 3);
        assert_eq!(
            storage.list_classes_by_teacher(teacher.user_id).await.unwrap().len(),
            1
        );
    }
}
