use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

// HTTP处理程序
pub async fn status(req: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.status(&req).await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/system").route("/status", web::get().to(status)));
}
