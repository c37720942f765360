use super::SeaOrmStorage;
use crate::entity::books::{ActiveModel, Column, Entity as Books};
use crate::errors::{BookshelfError, Result};
use crate::models::{
    PaginationInfo,
    books::{
        entities::Book,
        requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
        responses::BookListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

/// 子串匹配。通配符已被 `escape_like_pattern` 反斜杠转义，
/// 必须声明 ESCAPE 子句才能让 SQLite 按字面量处理（SQLite 的 LIKE 没有默认转义符）
fn contains_escaped(column: Column, term: &str) -> SimpleExpr {
    let escaped = escape_like_pattern(term);
    Expr::col(column).like(LikeExpr::new(format!("%{escaped}%")).escape('\\'))
}

impl SeaOrmStorage {
    /// 创建图书
    pub async fn create_book_impl(&self, req: CreateBookRequest) -> Result<Book> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            author: Set(req.author),
            year: Set(req.year),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("创建图书失败: {e}")))?;

        Ok(result.into_book())
    }

    /// 通过 ID 获取图书
    pub async fn get_book_by_id_impl(&self, id: i64) -> Result<Option<Book>> {
        let result = Books::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询图书失败: {e}")))?;

        Ok(result.map(|m| m.into_book()))
    }

    /// 分页列出图书
    pub async fn list_books_with_pagination_impl(
        &self,
        query: BookListQuery,
    ) -> Result<BookListResponse> {
        // 不带筛选条件的列表
        self.paginate_books(Books::find(), query).await
    }

    /// 按条件搜索图书
    pub async fn search_books_impl(&self, query: BookListQuery) -> Result<BookListResponse> {
        let mut select = Books::find();

        // 标题子串匹配
        if let Some(ref title) = query.title
            && !title.trim().is_empty()
        {
            select = select.filter(contains_escaped(Column::Title, title.trim()));
        }

        // 作者子串匹配
        if let Some(ref author) = query.author
            && !author.trim().is_empty()
        {
            select = select.filter(contains_escaped(Column::Author, author.trim()));
        }

        // 年份精确匹配
        if let Some(year) = query.year {
            select = select.filter(Column::Year.eq(year));
        }

        self.paginate_books(select, query).await
    }

    /// 分页 + 固定排序（ID 升序，保证翻页枚举稳定且不重不漏）
    async fn paginate_books(
        &self,
        select: sea_orm::Select<Books>,
        query: BookListQuery,
    ) -> Result<BookListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询图书总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询图书页数失败: {e}")))?;

        let books = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("查询图书列表失败: {e}")))?;

        Ok(BookListResponse {
            items: books.into_iter().map(|m| m.into_book()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新图书（部分字段）
    pub async fn update_book_impl(
        &self,
        id: i64,
        update: UpdateBookRequest,
    ) -> Result<Option<Book>> {
        // 先检查图书是否存在
        let existing = self.get_book_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(author) = update.author {
            model.author = Set(author);
        }

        if let Some(year) = update.year {
            model.year = Set(Some(year));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("更新图书失败: {e}")))?;

        self.get_book_by_id_impl(id).await
    }

    /// 删除图书
    pub async fn delete_book_impl(&self, id: i64) -> Result<bool> {
        let result = Books::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("删除图书失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计图书数量
    pub async fn count_books_impl(&self) -> Result<u64> {
        let count = Books::find()
            .count(&self.db)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("统计图书数量失败: {e}")))?;

        Ok(count)
    }
}
