pub mod books;
pub mod common;
pub mod reports;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，注入 app_data 供状态接口计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码，随响应体返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 4000,
    ValidationError = 4001,
    PaginationInvalid = 4002,

    BookNotFound = 4041,
    StudentNotFound = 4042,

    BookAlreadyExists = 4091,

    InternalServerError = 5000,
    DatabaseError = 5001,
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::ValidationError as i32, 4001);
        assert_eq!(ErrorCode::BookNotFound as i32, 4041);
        assert_eq!(ErrorCode::BookAlreadyExists as i32, 4091);
    }
}
