use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::reports::responses::StudentGradesResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn student_grades(
    service: &ReportService,
    full_name: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.student_grades(&full_name).await {
        Ok(Some(grades)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentGradesResponse { full_name, grades },
            "查询成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            format!("Student '{full_name}' not found"),
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to retrieve student grades: {e}"),
            )),
        ),
    }
}
