use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::services::MaterialService;
use crate::utils::{SafeClassIdI64, SafeMaterialIdI64};

static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

pub async fn create_material(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    material_data: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, class_id.0, material_data.into_inner())
        .await
}

pub async fn list_materials(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_materials(&req, class_id.0).await
}

pub async fn get_material(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_material(&req, material_id.0).await
}

pub async fn update_material(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
    update_data: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, material_id.0, update_data.into_inner())
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_material(&req, material_id.0).await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/class/{class_id}")
                    .route(web::get().to(list_materials))
                    // 所有权由服务层策略校验
                    .route(web::post().to(create_material)),
            )
            .service(
                web::resource("/{material_id}")
                    .route(web::get().to(get_material))
                    .route(web::put().to(update_material))
                    .route(web::delete().to(delete_material)),
            ),
    );
}
