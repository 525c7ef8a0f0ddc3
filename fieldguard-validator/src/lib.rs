//! Fieldguard Validator - 记录约束校验模块
//!
//! 为只包含字符串和整数字段的扁平记录提供声明式约束（required / min / max），
//! 按字段声明顺序校验，返回第一个违反的约束。

// 让派生宏生成的 `fieldguard_validator::` 路径在本 crate 内也能解析
extern crate self as fieldguard_validator;

pub mod error;
pub mod record;
pub mod registry;
pub mod schema;
pub mod validator;

pub use error::*;
pub use record::*;
pub use registry::*;
pub use schema::*;
pub use validator::*;

// 重新导出宏
pub use fieldguard_validator_macros::Record;
