use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_book(
    service: &BookService,
    book_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_book(book_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(format!(
            "Book with id {book_id} deleted"
        )))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BookNotFound,
            format!("Book with id {book_id} not found"),
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DatabaseError,
                format!("Book deletion failed: {e}"),
            )),
        ),
    }
}
