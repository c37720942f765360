use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::{
    ApiResponse, ErrorCode,
    books::requests::{BookListParams, BookListQuery},
};

pub async fn list_books(
    service: &BookService,
    query: BookListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 非法分页参数按规约报错，而不是静默修正
    if let Err(msg) = query.pagination.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PaginationInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let list_query = BookListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        ..Default::default()
    };

    match storage.list_books_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Book list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to retrieve book list: {e}"),
            )),
        ),
    }
}
