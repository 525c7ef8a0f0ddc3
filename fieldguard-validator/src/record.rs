use crate::error::SchemaResult;
use crate::schema::{FieldKind, RecordSchema};

/// 记录中单个字段的值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Str(_) => FieldKind::String,
            FieldValue::Int(_) => FieldKind::Integer,
        }
    }
}

/// 可作为记录字段的类型
///
/// 只为字符串和整数实现；其他类型的字段在 `#[derive(Record)]` 时无法编译。
pub trait AsFieldValue {
    const KIND: FieldKind;

    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self.as_str())
    }
}

impl AsFieldValue for str {
    const KIND: FieldKind = FieldKind::String;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

impl AsFieldValue for &str {
    const KIND: FieldKind = FieldKind::String;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Str(self)
    }
}

macro_rules! impl_integer_field {
    ($($ty:ty),*) => {
        $(
            impl AsFieldValue for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(i64::from(*self))
                }
            }
        )*
    };
}

impl_integer_field!(i8, i16, i32, i64, u8, u16, u32);

impl AsFieldValue for isize {
    const KIND: FieldKind = FieldKind::Integer;

    fn as_field_value(&self) -> FieldValue<'_> {
        // isize 在所有受支持平台上不超过 64 位
        FieldValue::Int(*self as i64)
    }
}

/// 可校验的扁平记录
///
/// 通常由 `#[derive(Record)]` 生成：
///
/// ```ignore
/// #[derive(Record)]
/// struct User {
///     #[constraint(required, min = 3, max = 10)]
///     name: String,
///     #[constraint(required, min = 25, max = 50)]
///     age: i64,
/// }
/// ```
pub trait Record {
    /// 记录种类名称，用于在 `SchemaRegistry` 中查找 schema
    fn kind() -> &'static str
    where
        Self: Sized;

    /// 构建该记录种类的 schema
    fn schema() -> SchemaResult<RecordSchema>
    where
        Self: Sized;

    /// 按名称读取字段值，未知字段返回 `None`
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_values() {
        let owned = String::from("widget");
        assert_eq!(owned.as_field_value(), FieldValue::Str("widget"));
        assert_eq!("gadget".as_field_value(), FieldValue::Str("gadget"));
        assert_eq!(<String as AsFieldValue>::KIND, FieldKind::String);
    }

    #[test]
    fn test_integer_values() {
        assert_eq!(42u8.as_field_value(), FieldValue::Int(42));
        assert_eq!((-7i32).as_field_value(), FieldValue::Int(-7));
        assert_eq!(u32::MAX.as_field_value(), FieldValue::Int(4_294_967_295));
        assert_eq!(3isize.as_field_value().kind(), FieldKind::Integer);
        assert_eq!(<i64 as AsFieldValue>::KIND, FieldKind::Integer);
    }
}
