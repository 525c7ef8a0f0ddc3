//! 统一响应体

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// 接口响应信封：`{ "code": 200, "msg": "...", "data": ... }`
///
/// HTTP 状态码与 `code` 一致；`code` 不是合法状态码时按 400 处理。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointResponse<T> {
    pub code: u16,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> EndpointResponse<T> {
    pub fn new(status: StatusCode, msg: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            msg: msg.into(),
            data,
        }
    }

    /// 创建一个 200 OK 响应
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, msg, Some(data))
    }

    /// 创建一个不带数据的错误响应
    pub fn error(status: StatusCode, msg: impl Into<String>) -> Self {
        Self::new(status, msg, None)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

impl<T> IntoResponse for EndpointResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
