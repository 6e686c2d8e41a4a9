//! 被校验值的辅助函数
//!
//! 值统一用 `serde_json::Value` 表示：字符串、数字、布尔、null、数组和对象。

use crate::error::Violation;
use crate::patterns;
use serde_json::Value;

pub const MSG_EMPTY_DATA: &str = "data cannot be empty";
pub const MSG_NO_LENGTH: &str = "data must have a length property";

/// 是否为 `required` 意义上的"空"
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => patterns::WHITESPACE.is_match(s),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// 把值转成数字
///
/// 数字直接取值；字符串去掉首尾空白后必须是合法的十进制文本且为有限值。
/// 其余类型都不算数字。
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if !patterns::NUMBER.is_match(trimmed) {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

/// 值的文本形式，字符串原样返回，其它类型取 JSON 表示
pub fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 长度：字符串按字符计数，数组按元素计数，数字按文本形式计数
pub fn length_of(value: &Value) -> Result<usize, Violation> {
    match value {
        Value::Null => Err(Violation::type_mismatch(MSG_EMPTY_DATA)),
        Value::String(s) => Ok(s.chars().count()),
        Value::Array(items) => Ok(items.len()),
        Value::Number(n) => Ok(n.to_string().chars().count()),
        Value::Bool(_) | Value::Object(_) => Err(Violation::type_mismatch(MSG_NO_LENGTH)),
    }
}
