//! Web 服务器模块
//!
//! 基于 Axum 的 Web 服务器实现

use axum::{middleware, Router};
use fieldguard_core::prelude::*;
use fieldguard_core::{SERVER_ENABLE_REQUEST_LOGGING, SERVER_HOST, SERVER_PORT};
use tokio::net::TcpListener;

use crate::middleware::{catch_panic, request_id, request_logging};
use crate::routes::routes;
use crate::state::AppState;

/// Web 服务器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProperties {
    /// 服务器监听地址
    pub host: String,

    /// 服务器监听端口
    pub port: u16,

    /// 是否启用请求日志
    pub enable_request_logging: bool,
}

impl Default for ServerProperties {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_request_logging: true,
        }
    }
}

impl ServerProperties {
    /// 从 Environment 加载配置
    pub fn from_environment(env: &Environment) -> ApplicationResult<Self> {
        let defaults = Self::default();

        let port = match env.get(SERVER_PORT) {
            None => defaults.port,
            Some(value) => value
                .as_i64()
                .and_then(|p| u16::try_from(p).ok())
                .ok_or_else(|| ApplicationError::InvalidConfig {
                    key: SERVER_PORT.to_string(),
                    message: format!("'{}' is not a valid port", value.as_string()),
                })?,
        };

        Ok(Self {
            host: env.get_string_or(SERVER_HOST, &defaults.host),
            port,
            enable_request_logging: env
                .get_bool_or(SERVER_ENABLE_REQUEST_LOGGING, defaults.enable_request_logging),
        })
    }

    /// 获取服务器地址
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 组装路由和中间件
pub fn build_router(state: AppState, properties: &ServerProperties) -> Router {
    let mut router = routes().layer(middleware::from_fn(catch_panic));

    if properties.enable_request_logging {
        router = router.layer(middleware::from_fn(request_logging));
    }

    router
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Fieldguard Web 服务器
pub struct WebServer {
    properties: ServerProperties,
    router: Router,
}

impl WebServer {
    pub fn new(properties: ServerProperties, state: AppState) -> Self {
        let router = build_router(state, &properties);
        Self { properties, router }
    }

    /// 启动服务器
    pub async fn run(self) -> ApplicationResult<()> {
        let addr = self.properties.address();

        tracing::info!("Starting server on {}", addr);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApplicationError::Other(format!("Failed to bind to {}: {}", addr, e)))?;

        tracing::info!("Server listening on http://{}", addr);

        axum::serve(listener, self.router.into_make_service()).await?;

        Ok(())
    }
}
