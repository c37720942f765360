use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::books::requests::{
    BookListParams, BookSearchParams, CreateBookRequest, UpdateBookRequest,
};
use crate::services::BookService;
use crate::utils::SafeBookIdI64;

// 懒加载的全局 BookService 实例
static BOOK_SERVICE: Lazy<BookService> = Lazy::new(BookService::new_lazy);

// HTTP处理程序
pub async fn create_book(
    req: HttpRequest,
    book_data: web::Json<CreateBookRequest>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.create_book(book_data.into_inner(), &req).await
}

pub async fn list_books(
    req: HttpRequest,
    query: web::Query<BookListParams>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.list_books(query.into_inner(), &req).await
}

pub async fn search_books(
    req: HttpRequest,
    query: web::Query<BookSearchParams>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.search_books(query.into_inner(), &req).await
}

pub async fn update_book(
    req: HttpRequest,
    book_id: SafeBookIdI64,
    update_data: web::Json<UpdateBookRequest>,
) -> ActixResult<HttpResponse> {
    BOOK_SERVICE
        .update_book(book_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_book(req: HttpRequest, book_id: SafeBookIdI64) -> ActixResult<HttpResponse> {
    BOOK_SERVICE.delete_book(book_id.0, &req).await
}

// 配置路由
pub fn configure_book_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/books")
            .route("/", web::post().to(create_book))
            .route("/", web::get().to(list_books))
            .route("/search/", web::get().to(search_books))
            .route("/{book_id}", web::put().to(update_book))
            .route("/{book_id}", web::delete().to(delete_book)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn test_storage() -> web::Data<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::new_in_memory()
                .await
                .expect("in-memory storage"),
        );
        web::Data::new(storage)
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(test_storage().await)
                    .configure(configure_book_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_and_list_books() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "Dune", "author": "Frank Herbert", "year": 1965}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["book"]["title"], "Dune");

        let req = test::TestRequest::get().uri("/books/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["author"], "Frank Herbert");
    }

    #[actix_web::test]
    async fn test_create_duplicate_book_conflict() {
        let app = test_app!();
        let payload = json!({"title": "Dune", "author": "Frank Herbert"});

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4091);
    }

    #[actix_web::test]
    async fn test_create_book_validation() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "  ", "author": "Someone"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "Future Book", "author": "Nobody", "year": 3000}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_list_books_invalid_pagination() {
        let app = test_app!();

        let req = test::TestRequest::get()
            .uri("/books/?page=0")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4002);

        let req = test::TestRequest::get()
            .uri("/books/?size=500")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_search_books() {
        let app = test_app!();
        for (title, author, year) in [
            ("The Left Hand of Darkness", "Ursula K. Le Guin", 1969),
            ("The Dispossessed", "Ursula K. Le Guin", 1974),
            ("Neuromancer", "William Gibson", 1984),
        ] {
            let req = test::TestRequest::post()
                .uri("/books/")
                .set_json(json!({"title": title, "author": author, "year": year}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), 201);
        }

        // 无任何条件
        let req = test::TestRequest::get().uri("/books/search/").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        // 标题子串不区分大小写
        let req = test::TestRequest::get()
            .uri("/books/search/?title=the%20")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 2);

        // 作者与年份组合
        let req = test::TestRequest::get()
            .uri("/books/search/?author=le%20guin&year=1974")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pagination"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["title"], "The Dispossessed");

        // 无匹配不是错误
        let req = test::TestRequest::get()
            .uri("/books/search/?title=zzz")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["pagination"]["total"], 0);
    }

    #[actix_web::test]
    async fn test_update_book() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "Draft", "author": "Anon"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["book"]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/books/{id}"))
            .set_json(json!({"year": 2001}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["book"]["title"], "Draft");
        assert_eq!(body["data"]["book"]["year"], 2001);

        // 空更新
        let req = test::TestRequest::put()
            .uri(&format!("/books/{id}"))
            .set_json(json!({}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        // 不存在的 id
        let req = test::TestRequest::put()
            .uri("/books/99999")
            .set_json(json!({"year": 2001}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    async fn test_update_into_duplicate_conflict() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "Solaris", "author": "Stanisław Lem"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "Fiasco", "author": "Stanisław Lem"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["book"]["id"].as_i64().unwrap();

        // 更新后与已有图书的 (title, author) 冲突
        let req = test::TestRequest::put()
            .uri(&format!("/books/{id}"))
            .set_json(json!({"title": "Solaris"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4091);
    }

    #[actix_web::test]
    async fn test_delete_book() {
        let app = test_app!();

        let req = test::TestRequest::post()
            .uri("/books/")
            .set_json(json!({"title": "Ephemeral", "author": "Anon"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["book"]["id"].as_i64().unwrap();

        let req = test::TestRequest::delete()
            .uri(&format!("/books/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::delete()
            .uri(&format!("/books/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4041);

        // 非法 id 格式
        let req = test::TestRequest::delete().uri("/books/abc").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }
}
