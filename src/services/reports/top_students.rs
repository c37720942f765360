use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::reports::requests::TopStudentsParams;
use crate::models::{ApiResponse, ErrorCode};

pub async fn top_students(
    service: &ReportService,
    params: TopStudentsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if params.limit == 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Limit must be >= 1",
        )));
    }

    let storage = service.get_storage(request);

    match storage.student_averages(Some(params.limit)).await {
        Ok(top) => Ok(HttpResponse::Ok().json(ApiResponse::success(top, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to compute top students: {e}"),
            )),
        ),
    }
}
