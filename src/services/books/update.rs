use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::{
    ApiResponse, ErrorCode,
    books::{requests::UpdateBookRequest, responses::BookResponse},
};
use crate::utils::validate::{validate_author, validate_title, validate_year};

pub async fn update_book(
    service: &BookService,
    book_id: i64,
    update_data: UpdateBookRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 至少要提供一个待更新字段
    if update_data.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "At least one field must be provided for update",
        )));
    }

    // 提供的字段按创建时同样的规则校验
    if let Some(ref title) = update_data.title
        && let Err(msg) = validate_title(title)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if let Some(ref author) = update_data.author
        && let Err(msg) = validate_author(author)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    if let Some(year) = update_data.year
        && let Err(msg) = validate_year(year)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_book(book_id, update_data).await {
        Ok(Some(book)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            BookResponse { book },
            "Book updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BookNotFound,
            format!("Book with id {book_id} not found"),
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::BookAlreadyExists,
                "Book with this title and author already exists",
            ),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Failed to update book: {e}"),
            )),
        ),
    }
}
