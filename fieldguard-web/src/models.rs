use fieldguard_validator::{Record, SchemaRegistry, SchemaResult};
use serde::{Deserialize, Serialize};

// ==================== 记录定义 ====================

/// 用户注册记录
#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct User {
    #[constraint(required, min = 3, max = 10)]
    pub name: String,

    #[constraint(required, min = 25, max = 50)]
    pub age: i64,

    #[constraint(required, min = 10, max = 100)]
    pub email: String,

    #[constraint(required, min = 3, max = 10)]
    pub password: String,
}

/// 商品创建记录
///
/// 缺失的 JSON 字段取零值，随后由 `required` 约束拒绝。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct Product {
    #[constraint(required, min = 3, max = 10)]
    pub name: String,

    #[constraint(required, min = 1000000, max = 100000000)]
    pub price: i64,

    #[constraint(required, min = 1, max = 100)]
    pub stock: i64,
}

// ==================== 请求/响应模型 ====================

/// `POST /user` 的表单数据
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub name: String,
    pub age: String,
    pub email: String,
    pub password: String,
}

impl UserForm {
    /// 合并两份表单：本表单为空的字段取 `fallback` 的值
    pub fn or(self, fallback: UserForm) -> Self {
        fn pick(primary: String, fallback: String) -> String {
            if primary.is_empty() {
                fallback
            } else {
                primary
            }
        }

        Self {
            name: pick(self.name, fallback.name),
            age: pick(self.age, fallback.age),
            email: pick(self.email, fallback.email),
            password: pick(self.password, fallback.password),
        }
    }
}

impl From<UserForm> for User {
    /// 无法解析的年龄按 0 处理，之后由 `required` 约束拒绝
    fn from(form: UserForm) -> Self {
        Self {
            name: form.name,
            age: form.age.parse().unwrap_or(0),
            email: form.email,
            password: form.password,
        }
    }
}

/// 商品创建成功后返回的数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductResponse {
    pub name: String,
    pub price: i64,
}

impl From<&Product> for NewProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// 注册服务用到的全部记录种类
pub fn default_registry() -> SchemaResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    registry.register::<User>()?.register::<Product>()?;
    Ok(registry)
}
