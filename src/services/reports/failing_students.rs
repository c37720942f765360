use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::reports::requests::FailingStudentsParams;
use crate::models::reports::responses::StudentNamesResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn failing_students(
    service: &ReportService,
    params: FailingStudentsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 阈值限定在成绩的合法区间内
    if !(1..=100).contains(&params.threshold) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Threshold must be between 1 and 100",
        )));
    }

    let storage = service.get_storage(request);

    match storage.students_with_grade_below(params.threshold).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentNamesResponse { students },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to list students with low grades: {e}"),
            )),
        ),
    }
}
