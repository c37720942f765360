use std::sync::Arc;

use crate::models::books::{
    entities::Book,
    requests::{BookListQuery, CreateBookRequest, UpdateBookRequest},
    responses::BookListResponse,
};
use crate::models::reports::responses::{StudentAverage, SubjectAverage, SubjectGrade};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 图书管理方法
    // 创建图书
    async fn create_book(&self, book: CreateBookRequest) -> Result<Book>;
    // 分页列出图书
    async fn list_books_with_pagination(&self, query: BookListQuery) -> Result<BookListResponse>;
    // 按条件搜索图书（标题/作者子串、年份精确匹配）
    async fn search_books(&self, query: BookListQuery) -> Result<BookListResponse>;
    // 更新图书
    async fn update_book(&self, id: i64, update: UpdateBookRequest) -> Result<Option<Book>>;
    // 删除图书
    async fn delete_book(&self, id: i64) -> Result<bool>;
    // 统计图书数量
    async fn count_books(&self) -> Result<u64>;

    /// 成绩报表方法
    // 写入固定的学生/成绩种子数据（仅当学生表为空）
    async fn seed_gradebook(&self) -> Result<bool>;
    // 统计学生数量
    async fn count_students(&self) -> Result<u64>;
    // 删除学生（成绩随外键级联删除）
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 查询某个学生的全部 (科目, 成绩)
    async fn student_grades(&self, full_name: &str) -> Result<Option<Vec<SubjectGrade>>>;
    // 每个学生的平均分，降序排名；limit 限制返回条数
    async fn student_averages(&self, limit: Option<u64>) -> Result<Vec<StudentAverage>>;
    // 出生年份晚于 cutoff 的学生姓名，升序
    async fn students_born_after(&self, cutoff_year: i32) -> Result<Vec<String>>;
    // 每个科目的平均分，按科目名升序
    async fn subject_averages(&self) -> Result<Vec<SubjectAverage>>;
    // 存在低于 threshold 成绩的学生姓名，去重升序
    async fn students_with_grade_below(&self, threshold: i32) -> Result<Vec<String>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
