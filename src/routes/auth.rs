use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::LoginRequest;
use crate::models::users::requests::CreateUserRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn get_profile(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_profile(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route(
                "/login",
                web::post()
                    .to(login)
                    // 防止暴力破解
                    .wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/register",
                web::post()
                    .to(register)
                    .wrap(middlewares::RateLimit::register()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(get_profile)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use crate::utils::json_error_handler;
    use actix_web::{App, http::StatusCode, http::header::AUTHORIZATION, test};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::connect_in_memory().await.unwrap())
    }

    // 每个用例使用独立的来源地址，避免共享限流计数
    fn peer(last_octet: u8) -> SocketAddr {
        SocketAddr::from(([10, 0, 1, last_octet], 40000))
    }

    #[actix_web::test]
    async fn test_register_login_and_profile() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage().await))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .peer_addr(peer(1))
            .set_json(json!({
                "username": "frizzle",
                "email": "Frizzle@Example.com",
                "password": "MagicBus2024",
                "role": "teacher",
                "birth_date": "1975-04-01"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["email"], "frizzle@example.com");
        assert!(body["data"]["user"].get("password_hash").is_none());

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .peer_addr(peer(1))
            .set_json(json!({"username": "frizzle@example.com", "password": "MagicBus2024"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let token = body["data"]["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["username"], "frizzle");
        assert_eq!(body["data"]["user"]["role"], "teacher");
    }

    #[actix_web::test]
    async fn test_register_rejects_duplicates_and_weak_passwords() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage().await))
                .configure(configure_auth_routes),
        )
        .await;

        let register = |username: &str, password: &str| {
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .peer_addr(peer(2))
                .set_json(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": password,
                    "role": "student"
                }))
                .to_request()
        };

        let resp = test::call_service(&app, register("arnold", "Fossils123")).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, register("arnold", "Fossils123")).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = test::call_service(&app, register("wanda", "short")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_login_failure_is_uniform() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage().await))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .peer_addr(peer(3))
            .set_json(json!({"username": "nobody", "password": "Whatever123"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_me_requires_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage().await))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
