pub mod create;
pub mod delete;
pub mod list;
pub mod search;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::books::requests::{
    BookListParams, BookSearchParams, CreateBookRequest, UpdateBookRequest,
};
use crate::storage::Storage;

pub struct BookService {
    storage: Option<Arc<dyn Storage>>,
}

impl BookService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建图书
    pub async fn create_book(
        &self,
        book_data: CreateBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_book(self, book_data, request).await
    }

    // 分页获取图书列表
    pub async fn list_books(
        &self,
        query: BookListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_books(self, query, request).await
    }

    // 搜索图书
    pub async fn search_books(
        &self,
        query: BookSearchParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        search::search_books(self, query, request).await
    }

    // 更新图书信息
    pub async fn update_book(
        &self,
        book_id: i64,
        update_data: UpdateBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_book(self, book_id, update_data, request).await
    }

    // 删除图书
    pub async fn delete_book(
        &self,
        book_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_book(self, book_id, request).await
    }
}
