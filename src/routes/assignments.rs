use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    CreateAssignmentRequest, SubmitAnswerRequest, UpdateAssignmentRequest,
};
use crate::services::AssignmentService;
use crate::utils::{SafeAssignmentIdI64, SafeClassIdI64};

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn create_assignment(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, class_id.0, assignment_data.into_inner())
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.list_assignments(&req, class_id.0).await
}

pub async fn get_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, assignment_id.0).await
}

pub async fn update_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, assignment_id.0, update_data.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, assignment_id.0).await
}

pub async fn submit_answer(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    answer: web::Json<SubmitAnswerRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_answer(&req, assignment_id.0, answer.into_inner())
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/class/{class_id}")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            )
            .service(
                web::resource("/{assignment_id}/submit").route(web::post().to(submit_answer)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::routes::configure_classes_routes;
    use crate::routes::testing::{bearer, seed_token};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::json_error_handler;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_assign_submit_and_review() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::connect_in_memory().await.unwrap());
        let teacher = seed_token(&storage, "teacher1", UserRole::Teacher).await;
        let student = seed_token(&storage, "student1", UserRole::Student).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(configure_classes_routes)
                .configure(configure_assignments_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/classes")
            .insert_header(bearer(&teacher))
            .set_json(json!({"name": "Algebra"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let class_id = body["data"]["id"].as_i64().unwrap();
        let code = body["data"]["code"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/v1/classes/join")
            .insert_header(bearer(&student))
            .set_json(json!({"code": code}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // 没有作业时返回 404
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/assignments/class/{class_id}"))
            .insert_header(bearer(&student))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/class/{class_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({"title": "HW 1", "document_link": "https://docs.example.com/hw1"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/class/{class_id}"))
            .insert_header(bearer(&teacher))
            .set_json(json!({
                "title": "HW 1",
                "instructions": "Solve all problems",
                "document_link": "https://docs.example.com/hw1",
                "deadline": "2099-01-24T12:00:00Z"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let assignment_id = body["data"]["id"].as_i64().unwrap();

        let submit = || {
            test::TestRequest::post()
                .uri(&format!("/api/v1/assignments/{assignment_id}/submit"))
                .insert_header(bearer(&student))
                .set_json(json!({"document_link": "https://docs.example.com/answer"}))
                .to_request()
        };
        assert_eq!(test::call_service(&app, submit()).await.status(), StatusCode::CREATED);
        let resp = test::call_service(&app, submit()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], crate::models::ErrorCode::AssignmentAlreadySubmitted as i32);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/assignments/{assignment_id}"))
            .insert_header(bearer(&teacher))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "HW 1");
        assert_eq!(body["data"]["submissions"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/assignments/999")
            .insert_header(bearer(&teacher))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        // 删除班级后作业随之删除
        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/classes/{class_id}"))
            .insert_header(bearer(&teacher))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/assignments/{assignment_id}"))
            .insert_header(bearer(&teacher))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
