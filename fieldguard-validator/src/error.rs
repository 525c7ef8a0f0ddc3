use std::fmt;
use thiserror::Error;

use crate::schema::FieldKind;

/// Schema 配置错误
///
/// 表示 schema 本身定义有误，与单条记录的校验失败无关。
/// 正确定义的 schema 不应该产生这类错误，应在注册/启动阶段尽早暴露。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unsupported field type '{type_name}' for field '{field}'")]
    UnsupportedType { field: String, type_name: String },

    #[error("invalid {bound} value for {field}: '{value}'")]
    MalformedBound {
        field: String,
        bound: BoundKind,
        value: String,
    },

    #[error("invalid required value for {field}: '{value}'")]
    MalformedRequired { field: String, value: String },

    #[error("{field} declares min {min} greater than max {max}")]
    InvertedBounds { field: String, min: i64, max: i64 },

    #[error("{field} declares a negative length {bound} of {value}")]
    NegativeLength {
        field: String,
        bound: BoundKind,
        value: i64,
    },

    #[error("field '{field}' is declared more than once in record '{record}'")]
    DuplicateField { record: String, field: String },

    #[error("record does not expose field '{field}' declared by its schema")]
    MissingField { field: String },

    #[error("field '{field}' is declared as {expected} but the record holds {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },

    #[error("record kind '{0}' is already registered")]
    DuplicateKind(String),

    #[error("record kind '{0}' is not registered")]
    UnregisteredKind(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// 边界类型（用于错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Min,
    Max,
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundKind::Min => write!(f, "min"),
            BoundKind::Max => write!(f, "max"),
        }
    }
}

/// 违反的约束种类，携带配置的边界值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    TooShort { min: i64 },
    TooLong { max: i64 },
    BelowMinimum { min: i64 },
    AboveMaximum { max: i64 },
}

/// 单个字段的校验失败
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", describe(.field, .kind))]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

fn describe(field: &str, kind: &ViolationKind) -> String {
    match kind {
        ViolationKind::Required => format!("{} is required", field),
        ViolationKind::TooShort { min } => {
            format!("{} must be at least {} characters long", field, min)
        }
        ViolationKind::TooLong { max } => {
            format!("{} must be at most {} characters long", field, max)
        }
        ViolationKind::BelowMinimum { min } => format!("{} must be at least {}", field, min),
        ViolationKind::AboveMaximum { max } => format!("{} must be at most {}", field, max),
    }
}

/// 校验结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(Violation),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(violation) => Some(violation),
        }
    }

    /// 转换为 `Result`，便于配合 `?` 使用
    pub fn into_result(self) -> Result<(), Violation> {
        match self {
            Verdict::Valid => Ok(()),
            Verdict::Invalid(violation) => Err(violation),
        }
    }
}
