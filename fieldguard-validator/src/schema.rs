//! 记录 schema 定义
//!
//! schema 在启动时构建一次，此后只读，可通过 `Arc` 在任意数量的调用方之间共享。

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{BoundKind, SchemaError, SchemaResult};

/// 字段语义类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Integer,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
        }
    }
}

impl FromStr for FieldKind {
    type Err = SchemaError;

    /// 从类型标签解析，未知类型返回 `UnsupportedType`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" => Ok(FieldKind::String),
            "int" | "integer" | "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16"
            | "u32" => Ok(FieldKind::Integer),
            other => Err(SchemaError::UnsupportedType {
                field: String::new(),
                type_name: other.to_string(),
            }),
        }
    }
}

/// 约束集合
///
/// `min`/`max` 为 `None` 表示没有边界，与 `Some(0)` 不同。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl ConstraintSet {
    pub const fn new() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    pub const fn max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// 从字符串标签解析约束
    ///
    /// 缺失的标签（`None` 或空白）表示未设置；无法解析的值立即返回错误，
    /// 而不是推迟到校验每条记录时。
    pub fn from_tags(
        field: &str,
        required: Option<&str>,
        min: Option<&str>,
        max: Option<&str>,
    ) -> SchemaResult<Self> {
        let required = match required.map(str::trim).filter(|s| !s.is_empty()) {
            None => false,
            Some(value) => value.parse::<bool>().map_err(|_| SchemaError::MalformedRequired {
                field: field.to_string(),
                value: value.to_string(),
            })?,
        };

        Ok(Self {
            required,
            min: parse_bound(field, BoundKind::Min, min)?,
            max: parse_bound(field, BoundKind::Max, max)?,
        })
    }

    /// 是否至少有一个正数边界；否则整个边界检查都会被跳过
    pub fn has_positive_bound(&self) -> bool {
        self.min.is_some_and(|min| min > 0) || self.max.is_some_and(|max| max > 0)
    }

    fn check(&self, field: &str, kind: FieldKind) -> SchemaResult<()> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(SchemaError::InvertedBounds {
                    field: field.to_string(),
                    min,
                    max,
                });
            }
        }

        if kind == FieldKind::String {
            for (bound, value) in [(BoundKind::Min, self.min), (BoundKind::Max, self.max)] {
                if let Some(value) = value.filter(|v| *v < 0) {
                    return Err(SchemaError::NegativeLength {
                        field: field.to_string(),
                        bound,
                        value,
                    });
                }
            }
        }

        Ok(())
    }
}

fn parse_bound(field: &str, bound: BoundKind, raw: Option<&str>) -> SchemaResult<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| SchemaError::MalformedBound {
                field: field.to_string(),
                bound,
                value: value.to_string(),
            }),
    }
}

/// 字段描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub constraints: ConstraintSet,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, constraints: ConstraintSet) -> Self {
        Self {
            name: name.into(),
            kind,
            constraints,
        }
    }

    pub fn string(name: impl Into<String>, constraints: ConstraintSet) -> Self {
        Self::new(name, FieldKind::String, constraints)
    }

    pub fn integer(name: impl Into<String>, constraints: ConstraintSet) -> Self {
        Self::new(name, FieldKind::Integer, constraints)
    }

    /// 从字符串标签构建，类型和边界都在此处解析
    pub fn from_tags(
        name: impl Into<String>,
        type_tag: &str,
        required: Option<&str>,
        min: Option<&str>,
        max: Option<&str>,
    ) -> SchemaResult<Self> {
        let name = name.into();
        let kind = type_tag.parse::<FieldKind>().map_err(|err| match err {
            SchemaError::UnsupportedType { type_name, .. } => SchemaError::UnsupportedType {
                field: name.clone(),
                type_name,
            },
            other => other,
        })?;
        let constraints = ConstraintSet::from_tags(&name, required, min, max)?;
        Ok(Self::new(name, kind, constraints))
    }
}

/// 记录 schema：按声明顺序排列的字段描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    kind: String,
    fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    pub fn builder(kind: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(kind)
    }

    /// 记录种类名称（如 `User`、`Product`）
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Schema 构建器
///
/// `build` 时检查所有字段描述，任何配置错误都在这里返回。
pub struct SchemaBuilder {
    kind: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn string(self, name: impl Into<String>, constraints: ConstraintSet) -> Self {
        self.field(FieldDescriptor::string(name, constraints))
    }

    pub fn integer(self, name: impl Into<String>, constraints: ConstraintSet) -> Self {
        self.field(FieldDescriptor::integer(name, constraints))
    }

    pub fn build(self) -> SchemaResult<RecordSchema> {
        let mut seen = HashSet::new();
        for descriptor in &self.fields {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    record: self.kind.clone(),
                    field: descriptor.name.clone(),
                });
            }
            descriptor.constraints.check(&descriptor.name, descriptor.kind)?;
        }

        tracing::debug!(kind = %self.kind, fields = self.fields.len(), "Record schema built");

        Ok(RecordSchema {
            kind: self.kind,
            fields: self.fields,
        })
    }
}
