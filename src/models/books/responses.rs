use super::entities::Book;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 图书响应
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub book: Book,
}

// 图书列表响应
#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub items: Vec<Book>,
    pub pagination: PaginationInfo,
}
