//! Sieve Validator - 链式字段校验
//!
//! 给一个值贴上标签，然后依次串联规则：必填、长度、数值范围、格式、正则、自定义函数。
//! 第一条失败的规则会记录一条带标签前缀的错误消息，之后的规则全部跳过。
//!
//! ```
//! use sieve_validator::Validator;
//!
//! let mut phone = Validator::with_label("13800138000", "手机号");
//! phone.is_required().is_phone();
//! assert!(phone.passed());
//! ```

pub mod error;
pub mod patterns;
pub mod rules;
pub mod validator;
pub mod value;

pub use error::*;
pub use validator::*;

pub use serde_json::{json, Value};
pub use sieve_core::ValidatorOptions;
