use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::reports::requests::BornAfterParams;
use crate::models::reports::responses::StudentNamesResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn born_after(
    service: &ReportService,
    params: BornAfterParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.students_born_after(params.year).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentNamesResponse { students },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to filter students by birth year: {e}"),
            )),
        ),
    }
}
