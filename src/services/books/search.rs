use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::{
    ApiResponse, ErrorCode,
    books::requests::{BookListQuery, BookSearchParams},
};

pub async fn search_books(
    service: &BookService,
    query: BookSearchParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 至少要提供一个搜索条件
    if !query.has_criteria() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "At least one search criterion must be provided",
        )));
    }

    if let Err(msg) = query.pagination.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PaginationInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let search_query = BookListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        title: query.title,
        author: query.author,
        year: query.year,
    };

    // 无匹配不是错误，返回空列表
    match storage.search_books(search_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "搜索成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Book search failed: {e}"),
            )),
        ),
    }
}
