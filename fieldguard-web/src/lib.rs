//! # Fieldguard Web
//!
//! 基于 Axum 的 HTTP 层：把请求解码为记录，交给 `fieldguard-validator` 校验，
//! 再把校验结论转换为 HTTP 响应。

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub mod prelude {
    //! 预导入模块

    pub use crate::error::WebError;
    pub use crate::extractors::ValidatedJson;
    pub use crate::models::{default_registry, NewProductResponse, Product, User, UserForm};
    pub use crate::response::EndpointResponse;
    pub use crate::server::{build_router, ServerProperties, WebServer};
    pub use crate::state::AppState;
}
