use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{SchemaError, SchemaResult, Verdict};
use crate::record::Record;
use crate::schema::RecordSchema;
use crate::validator;

/// Schema 注册表
///
/// 启动时注册所有记录种类，之后只读；通过 `Arc<SchemaRegistry>` 传给需要校验的组件。
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<RecordSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册记录种类，schema 配置错误会在这里立即返回
    pub fn register<R: Record>(&mut self) -> SchemaResult<&mut Self> {
        let schema = R::schema()?;
        self.insert(R::kind(), schema)?;
        Ok(self)
    }

    /// 注册手工构建的 schema
    pub fn register_schema(&mut self, schema: RecordSchema) -> SchemaResult<&mut Self> {
        let kind = schema.kind().to_string();
        self.insert(&kind, schema)?;
        Ok(self)
    }

    fn insert(&mut self, kind: &str, schema: RecordSchema) -> SchemaResult<()> {
        if self.schemas.contains_key(kind) {
            return Err(SchemaError::DuplicateKind(kind.to_string()));
        }

        tracing::info!(kind = %kind, fields = schema.len(), "Registered record schema");
        self.schemas.insert(kind.to_string(), Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, kind: &str) -> Option<Arc<RecordSchema>> {
        self.schemas.get(kind).cloned()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.schemas.contains_key(kind)
    }

    /// 所有已注册的种类名称（已排序）
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.schemas.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// 用已注册的 schema 校验记录
    pub fn validate<R: Record>(&self, record: &R) -> SchemaResult<Verdict> {
        let schema = self
            .schemas
            .get(R::kind())
            .ok_or_else(|| SchemaError::UnregisteredKind(R::kind().to_string()))?;
        validator::validate(record, schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Violation, ViolationKind};
    use crate::record::{AsFieldValue, FieldValue};
    use crate::schema::ConstraintSet;

    struct Product {
        name: String,
        price: i64,
    }

    impl Record for Product {
        fn kind() -> &'static str {
            "Product"
        }

        fn schema() -> SchemaResult<RecordSchema> {
            RecordSchema::builder("Product")
                .string("name", ConstraintSet::new().required().min(3).max(10))
                .integer("price", ConstraintSet::new().required().min(1_000_000).max(100_000_000))
                .build()
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "name" => Some(self.name.as_field_value()),
                "price" => Some(self.price.as_field_value()),
                _ => None,
            }
        }
    }

    struct Broken;

    impl Record for Broken {
        fn kind() -> &'static str {
            "Broken"
        }

        fn schema() -> SchemaResult<RecordSchema> {
            RecordSchema::builder("Broken")
                .integer("count", ConstraintSet::new().min(10).max(1))
                .build()
        }

        fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
            None
        }
    }

    #[test]
    fn test_register_and_validate() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Product>().unwrap();

        let product = Product {
            name: "laptop".to_string(),
            price: 500,
        };
        assert_eq!(
            registry.validate(&product).unwrap(),
            Verdict::Invalid(Violation::new("price", ViolationKind::BelowMinimum { min: 1_000_000 }))
        );

        let product = Product {
            name: "laptop".to_string(),
            price: 2_000_000,
        };
        assert!(registry.validate(&product).unwrap().is_valid());
    }

    #[test]
    fn test_register_fails_fast_on_bad_schema() {
        let mut registry = SchemaRegistry::new();
        let err = registry.register::<Broken>().unwrap_err();

        assert!(matches!(err, SchemaError::InvertedBounds { .. }));
        assert!(!registry.contains("Broken"));
    }

    #[test]
    fn test_duplicate_kind() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Product>().unwrap();

        let err = registry.register::<Product>().unwrap_err();
        assert_eq!(err, SchemaError::DuplicateKind("Product".to_string()));
    }

    #[test]
    fn test_unregistered_kind() {
        let registry = SchemaRegistry::new();
        let product = Product {
            name: "laptop".to_string(),
            price: 2_000_000,
        };

        let err = registry.validate(&product).unwrap_err();
        assert_eq!(err, SchemaError::UnregisteredKind("Product".to_string()));
    }

    #[test]
    fn test_register_schema_and_kinds() {
        let mut registry = SchemaRegistry::new();
        registry
            .register_schema(RecordSchema::builder("Zeta").build().unwrap())
            .unwrap()
            .register::<Product>()
            .unwrap();

        assert_eq!(registry.kinds(), vec!["Product", "Zeta"]);
        assert_eq!(registry.get("Product").map(|s| s.len()), Some(2));
    }

    #[test]
    fn test_shared_across_threads() {
        let mut registry = SchemaRegistry::new();
        registry.register::<Product>().unwrap();
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let product = Product {
                        name: format!("item-{}", i),
                        price: 1_000_000 + i,
                    };
                    registry.validate(&product).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap().is_valid());
        }
    }
}
