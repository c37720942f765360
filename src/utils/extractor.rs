//! 路径参数提取器
//!
//! 将 `{book_id}` 之类的路径段解析为正整数，解析失败时直接返回
//! 统一响应格式的 400，而不是 actix 默认的纯文本错误。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 图书 ID 路径参数，保证为正的 i64
#[derive(Debug, Clone, Copy)]
pub struct SafeBookIdI64(pub i64);

impl FromRequest for SafeBookIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("book_id").unwrap_or_default();

        let parsed = raw.parse::<i64>().ok().filter(|id| *id > 0);

        let result = match parsed {
            Some(id) => Ok(SafeBookIdI64(id)),
            None => {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!("Invalid book id: '{raw}'"),
                ));
                Err(InternalError::from_response("invalid book id", response).into())
            }
        };

        ready(result)
    }
}
