//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod books;
mod gradebook;

use crate::config::AppConfig;
use crate::errors::{BookshelfError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| BookshelfError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| BookshelfError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| BookshelfError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(BookshelfError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 测试用：内存 SQLite + 全量迁移
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        let db = Database::connect("sqlite::memory:")
            .await
            .map_err(|e| BookshelfError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Migrator::up(&db, None)
            .await
            .map_err(|e| BookshelfError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }
}

// Storage trait 实现
use crate::models::books::{
    entities::Book,
    requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
    responses::BookListResponse,
};
use crate::models::reports::responses::{StudentAverage, SubjectAverage, SubjectGrade};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 图书模块
    async fn create_book(&self, book: CreateBookRequest) -> Result<Book> {
        self.create_book_impl(book).await
    }

    async fn list_books_with_pagination(&self, query: BookListQuery) -> Result<BookListResponse> {
        self.list_books_with_pagination_impl(query).await
    }

    async fn search_books(&self, query: BookListQuery) -> Result<BookListResponse> {
        self.search_books_impl(query).await
    }

    async fn update_book(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>> {
        self.update_book_impl(id, update).await
    }

    async fn delete_book(&self, id: i64) -> Result<bool> {
        self.delete_book_impl(id).await
    }

    async fn count_books(&self) -> Result<u64> {
        self.count_books_impl().await
    }

    // 成绩报表模块
    async fn seed_gradebook(&self) -> Result<bool> {
        self.seed_gradebook_impl().await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn student_grades(&self, full_name: &str) -> Result<Option<Vec<SubjectGrade>>> {
        self.student_grades_impl(full_name).await
    }

    async fn student_averages(&self, limit: Option<u64>) -> Result<Vec<StudentAverage>> {
        self.student_averages_impl(limit).await
    }

    async fn students_born_after(&self, cutoff_year: i32) -> Result<Vec<String>> {
        self.students_born_after_impl(cutoff_year).await
    }

    async fn subject_averages(&self) -> Result<Vec<SubjectAverage>> {
        self.subject_averages_impl().await
    }

    async fn students_with_grade_below(&self, threshold: i32) -> Result<Vec<String>> {
        self.students_with_grade_below_impl(threshold).await
    }
}
