//! 配置键常量定义

/// 环境变量前缀，例如 `FIELDGUARD_SERVER_PORT` -> `server.port`
pub const ENV_PREFIX: &str = "FIELDGUARD_";

/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "fieldguard.toml";

// ==================== Server 配置 ====================

/// 服务器监听地址
pub const SERVER_HOST: &str = "server.host";

/// 服务器监听端口
pub const SERVER_PORT: &str = "server.port";

/// 是否启用请求日志
pub const SERVER_ENABLE_REQUEST_LOGGING: &str = "server.enable-request-logging";

// ==================== Logging 配置 ====================

/// 日志级别
pub const LOGGING_LEVEL: &str = "logging.level";

/// 日志格式（compact / full / json / pretty）
pub const LOGGING_FORMAT: &str = "logging.format";

/// 是否显示模块路径
pub const LOGGING_SHOW_TARGET: &str = "logging.show-target";

/// 自定义过滤器，例如 "fieldguard_web=debug,tower_http=info"
pub const LOGGING_FILTER: &str = "logging.filter";
