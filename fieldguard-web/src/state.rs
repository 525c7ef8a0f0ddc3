use std::sync::Arc;

use axum::extract::FromRef;
use fieldguard_validator::SchemaRegistry;

/// 路由共享状态
///
/// schema 注册表在启动时构建，之后通过状态显式传给处理器和提取器。
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SchemaRegistry>,
}

impl AppState {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

impl FromRef<AppState> for Arc<SchemaRegistry> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.registry)
    }
}
