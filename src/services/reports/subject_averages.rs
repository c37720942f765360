use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn subject_averages(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.subject_averages().await {
        Ok(averages) => Ok(HttpResponse::Ok().json(ApiResponse::success(averages, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to compute subject averages: {e}"),
            )),
        ),
    }
}
