use crate::error::{SchemaError, SchemaResult, Verdict, Violation, ViolationKind};
use crate::record::{FieldValue, Record};
use crate::schema::{ConstraintSet, FieldDescriptor, RecordSchema};

/// 校验 trait
///
/// 所有 `Record` 都自动实现：按记录自身的 schema 进行校验。
/// 高频调用时应通过 `SchemaRegistry` 复用已构建的 schema。
pub trait Validate {
    fn validate(&self) -> SchemaResult<Verdict>;
}

impl<R: Record> Validate for R {
    fn validate(&self) -> SchemaResult<Verdict> {
        let schema = R::schema()?;
        validate(self, &schema)
    }
}

/// 按 schema 校验记录
///
/// 字段按 schema 声明顺序检查，遇到第一个违反的约束立即返回。
/// schema 与记录不匹配（字段缺失、类型不符）属于配置错误，以 `Err` 返回。
pub fn validate<R>(record: &R, schema: &RecordSchema) -> SchemaResult<Verdict>
where
    R: Record + ?Sized,
{
    for descriptor in schema.fields() {
        let value = record
            .field(&descriptor.name)
            .ok_or_else(|| SchemaError::MissingField {
                field: descriptor.name.clone(),
            })?;

        if let Some(kind) = check_field(descriptor, value)? {
            tracing::debug!(
                record = %schema.kind(),
                field = %descriptor.name,
                violation = ?kind,
                "Record failed validation"
            );
            return Ok(Verdict::Invalid(Violation::new(descriptor.name.clone(), kind)));
        }
    }

    Ok(Verdict::Valid)
}

/// 检查单个字段，返回第一个违反的约束
pub fn check_field(
    descriptor: &FieldDescriptor,
    value: FieldValue<'_>,
) -> SchemaResult<Option<ViolationKind>> {
    if value.kind() != descriptor.kind {
        return Err(SchemaError::TypeMismatch {
            field: descriptor.name.clone(),
            expected: descriptor.kind,
            found: value.kind(),
        });
    }

    let constraints = &descriptor.constraints;
    let violation = match value {
        FieldValue::Str(s) => ConstraintRules::required_str(s, constraints)
            .or_else(|| ConstraintRules::length(s, constraints)),
        FieldValue::Int(v) => ConstraintRules::required_int(v, constraints)
            .or_else(|| ConstraintRules::range(v, constraints)),
    };

    Ok(violation)
}

/// 约束规则
pub struct ConstraintRules;

impl ConstraintRules {
    /// 必填字符串不能为空
    pub fn required_str(value: &str, constraints: &ConstraintSet) -> Option<ViolationKind> {
        (constraints.required && value.is_empty()).then_some(ViolationKind::Required)
    }

    /// 必填整数必须为正数
    ///
    /// 0 和负数与"未提供"无法区分。
    pub fn required_int(value: i64, constraints: &ConstraintSet) -> Option<ViolationKind> {
        (constraints.required && value <= 0).then_some(ViolationKind::Required)
    }

    /// 验证字符串长度（按字符计数）
    pub fn length(value: &str, constraints: &ConstraintSet) -> Option<ViolationKind> {
        if !constraints.has_positive_bound() {
            return None;
        }

        let len = i64::try_from(value.chars().count()).unwrap_or(i64::MAX);

        if let Some(min) = constraints.min {
            if len < min {
                return Some(ViolationKind::TooShort { min });
            }
        }

        if let Some(max) = constraints.max {
            if len > max {
                return Some(ViolationKind::TooLong { max });
            }
        }

        None
    }

    /// 验证数值范围
    pub fn range(value: i64, constraints: &ConstraintSet) -> Option<ViolationKind> {
        if !constraints.has_positive_bound() {
            return None;
        }

        if let Some(min) = constraints.min {
            if value < min {
                return Some(ViolationKind::BelowMinimum { min });
            }
        }

        if let Some(max) = constraints.max {
            if value > max {
                return Some(ViolationKind::AboveMaximum { max });
            }
        }

        None
    }
}
