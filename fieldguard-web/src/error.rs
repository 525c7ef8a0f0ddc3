//! Web 层错误类型
//!
//! 每个错误都映射为统一的 `EndpointResponse` 响应体：
//! 请求数据问题返回 400，schema 配置错误和 panic 返回 500。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fieldguard_validator::{SchemaError, Violation};
use thiserror::Error;

use crate::response::EndpointResponse;

#[derive(Error, Debug)]
pub enum WebError {
    /// JSON 解析错误 - 400 Bad Request
    #[error("Invalid JSON")]
    JsonParse { message: String },

    /// 记录未通过约束校验 - 400 Bad Request
    #[error("{0}")]
    Validation(Violation),

    /// schema 定义错误 - 500 Internal Server Error
    #[error("Internal Server Error")]
    Schema(#[from] SchemaError),

    /// 内部服务器错误 - 500 Internal Server Error
    #[error("Internal Server Error")]
    Internal(String),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::JsonParse { .. } | WebError::Validation(_) => StatusCode::BAD_REQUEST,
            WebError::Schema(_) | WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Violation> for WebError {
    fn from(violation: Violation) -> Self {
        WebError::Validation(violation)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match &self {
            WebError::JsonParse { message } => {
                tracing::warn!(error = %message, "JSON decoding error");
            }
            WebError::Validation(violation) => {
                tracing::warn!(field = %violation.field, error = %violation, "Validation error");
            }
            WebError::Schema(err) => {
                tracing::error!(error = %err, "Record schema is misconfigured");
            }
            WebError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
            }
        }

        EndpointResponse::<()>::error(self.status_code(), self.to_string()).into_response()
    }
}
