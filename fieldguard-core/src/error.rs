use thiserror::Error;

/// 应用启动阶段的错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Failed to load configuration from {source_name}: {message}")]
    ConfigLoad { source_name: String, message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
