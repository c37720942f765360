use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 图书列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct BookListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}

// 图书创建请求
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

// 图书更新请求，所有字段可选，但至少要提供一个
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl UpdateBookRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }
}

// 图书搜索参数（来自HTTP请求），至少要提供一个条件
#[derive(Debug, Deserialize)]
pub struct BookSearchParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub title: Option<String>,
    pub author: Option<String>,
    // query string 中数值以字符串形式出现
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub year: Option<i32>,
}

fn deserialize_optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl BookSearchParams {
    pub fn has_criteria(&self) -> bool {
        self.title.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.author.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.year.is_some()
    }
}

// 图书列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct BookListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_is_empty() {
        let empty: UpdateBookRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let with_year: UpdateBookRequest = serde_json::from_str(r#"{"year": 1999}"#).unwrap();
        assert!(!with_year.is_empty());
    }

    #[test]
    fn test_search_params_criteria() {
        let none: BookSearchParams = serde_json::from_str("{}").unwrap();
        assert!(!none.has_criteria());

        let blank: BookSearchParams = serde_json::from_str(r#"{"title": "   "}"#).unwrap();
        assert!(!blank.has_criteria());

        let by_author: BookSearchParams = serde_json::from_str(r#"{"author": "Lem"}"#).unwrap();
        assert!(by_author.has_criteria());
    }
}
