use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::achievements::requests::RecordAchievementRequest;
use crate::models::users::entities::UserRole;
use crate::services::AchievementService;
use crate::utils::SafeStudentIdI64;

static ACHIEVEMENT_SERVICE: Lazy<AchievementService> = Lazy::new(AchievementService::new_lazy);

pub async fn get_student_achievements(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE
        .get_student_achievements(&req, student_id.0)
        .await
}

pub async fn record_achievement(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    achievement: web::Json<RecordAchievementRequest>,
) -> ActixResult<HttpResponse> {
    ACHIEVEMENT_SERVICE
        .record_achievement(&req, student_id.0, achievement.into_inner())
        .await
}

// 配置路由
pub fn configure_achievements_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/achievements")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{student_id}")
                    .route(web::get().to(get_student_achievements))
                    .route(
                        web::put()
                            .to(record_achievement)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );
}
