use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use super::SystemService;
use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
    pub book_count: u64,
    pub student_count: u64,
}

pub async fn status(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let storage = service.get_storage(request);

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or(0);

    let book_count = match storage.count_books().await {
        Ok(count) => count,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DatabaseError,
                    format!("Failed to count books: {e}"),
                )),
            );
        }
    };

    let student_count = match storage.count_students().await {
        Ok(count) => count,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DatabaseError,
                    format!("Failed to count students: {e}"),
                )),
            );
        }
    };

    let status = SystemStatus {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
        book_count,
        student_count,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(status, "服务运行正常")))
}
