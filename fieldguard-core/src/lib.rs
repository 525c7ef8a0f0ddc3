// fieldguard-core: 公共基础设施
//
// - 分层配置（TOML 文件 + 环境变量）
// - 基于 tracing 的日志初始化
// - 启动阶段错误类型

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

pub use config::{
    ConfigValue, Environment, EnvironmentPropertySource, MapPropertySource, PropertySource,
    TomlPropertySource,
};
pub use constants::*;
pub use error::{ApplicationError, ApplicationResult};
pub use logging::{LogFormat, LogLevel, LoggingConfig};

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::config::{
        ConfigValue, Environment, EnvironmentPropertySource, MapPropertySource, PropertySource,
        TomlPropertySource,
    };
    pub use crate::error::{ApplicationError, ApplicationResult};
    pub use crate::logging::{LogFormat, LogLevel, LoggingConfig};
}
