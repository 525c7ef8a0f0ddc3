//! 带校验的提取器

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, Request},
    Json,
};
use fieldguard_validator::{Record, SchemaRegistry};
use serde::de::DeserializeOwned;

use crate::error::WebError;

/// ValidatedJson 提取器
///
/// 从 JSON 请求体反序列化记录，并用状态中的 `SchemaRegistry` 校验。
/// 解析失败返回 `WebError::JsonParse`，校验失败返回 `WebError::Validation`。
///
/// 用法示例：
/// ```ignore
/// async fn create_product(ValidatedJson(product): ValidatedJson<Product>) -> impl IntoResponse {
///     // product 已经通过校验
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Record + Send,
    Arc<SchemaRegistry>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // 1. 解析 JSON
        let Json(record) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| WebError::JsonParse {
                message: e.body_text(),
            })?;

        // 2. 执行校验
        let registry = Arc::<SchemaRegistry>::from_ref(state);
        registry.validate(&record)?.into_result()?;

        Ok(ValidatedJson(record))
    }
}
