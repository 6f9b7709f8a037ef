use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{CreateClassRequest, JoinClassRequest, UpdateClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.join_class(&req, join_data.into_inner()).await
}

pub async fn list_teacher_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_teacher_classes(&req).await
}

pub async fn list_joined_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_joined_classes(&req).await
}

pub async fn get_class_code(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class_code(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn leave_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.leave_class(&req, class_id.0).await
}

pub async fn get_class_members(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class_members(&req, class_id.0).await
}

pub async fn get_class_details(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class_details(&req, class_id.0).await
}

// 配置路由
//
// 固定路径（/join、/teacher、/student）须在 /{class_id} 之前注册
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_class)
                        // 仅教师可以创建班级
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/join").route(
                    web::post()
                        .to(join_class)
                        // 防止暴力枚举邀请码
                        .wrap(middlewares::RateLimit::join_code()),
                ),
            )
            .service(
                web::resource("/teacher").route(
                    web::get()
                        .to(list_teacher_classes)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/student").route(
                    web::get()
                        .to(list_joined_classes)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{class_id}")
                    // 所有权由服务层策略校验
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .service(web::resource("/{class_id}/code").route(web::get().to(get_class_code)))
            .service(web::resource("/{class_id}/leave").route(web::post().to(leave_class)))
            .service(web::resource("/{class_id}/members").route(web::get().to(get_class_members)))
            .service(web::resource("/{class_id}/details").route(web::get().to(get_class_details))),
    );
}
