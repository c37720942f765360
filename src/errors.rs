//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_bookshelf_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum BookshelfError {
            $($variant(String),)*
        }

        impl BookshelfError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(BookshelfError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(BookshelfError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(BookshelfError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl BookshelfError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        BookshelfError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_bookshelf_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Unique Constraint Conflict"),
    Serialization("E007", "Serialization Error"),
    Io("E008", "IO Error"),
}

impl BookshelfError {
    /// 判断底层数据库错误是否为唯一约束冲突
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        // SQLite / PostgreSQL / MySQL 的唯一约束报错文案各不相同
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for BookshelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BookshelfError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for BookshelfError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookshelfError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for BookshelfError {
    fn from(err: std::io::Error) -> Self {
        BookshelfError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookshelfError {
    fn from(err: serde_json::Error) -> Self {
        BookshelfError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BookshelfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(BookshelfError::database_config("test").code(), "E001");
        assert_eq!(BookshelfError::validation("test").code(), "E004");
        assert_eq!(BookshelfError::not_found("test").code(), "E005");
        assert_eq!(BookshelfError::conflict("test").code(), "E006");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            BookshelfError::database_connection("test").error_type(),
            "Database Connection Error"
        );
        assert_eq!(
            BookshelfError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = BookshelfError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = BookshelfError::not_found("Book with id 42 not found");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("42"));
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = BookshelfError::database_operation(
            "UNIQUE constraint failed: books.title, books.author",
        );
        assert!(sqlite.is_unique_violation());

        let postgres = BookshelfError::database_operation(
            "duplicate key value violates unique constraint \"uix_books_title_author\"",
        );
        assert!(postgres.is_unique_violation());

        let other = BookshelfError::database_operation("no such table: books");
        assert!(!other.is_unique_violation());
    }
}
