use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::BookService;
use crate::models::{
    ApiResponse, ErrorCode,
    books::{requests::CreateBookRequest, responses::BookResponse},
};
use crate::utils::validate::{validate_author, validate_title, validate_year};

pub async fn create_book(
    service: &BookService,
    book_data: CreateBookRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 验证标题
    if let Err(msg) = validate_title(&book_data.title) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 验证作者
    if let Err(msg) = validate_author(&book_data.author) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 验证出版年份
    if let Some(year) = book_data.year
        && let Err(msg) = validate_year(year)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_book(book_data).await {
        Ok(book) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(BookResponse { book }, "图书创建成功"))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::BookAlreadyExists,
                "Book with this title and author already exists",
            ),
        )),
        Err(e) => {
            let msg = format!("Book creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::DatabaseError, msg)))
        }
    }
}
