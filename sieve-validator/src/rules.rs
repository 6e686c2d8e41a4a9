//! 规则函数
//!
//! 每条规则都是 `(&Value, 参数) -> Result<(), Violation>` 形式的纯函数，
//! 不关心标签和短路状态，可以脱离 `Validator` 单独测试和复用。
//! 参数检查先于类型检查，类型检查先于条件判断。

use crate::error::Violation;
use crate::patterns;
use crate::value::{is_blank, length_of, numeric, text_of};
use regex::Regex;
use serde_json::Value;
use std::fmt::Display;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub type RuleOutcome = Result<(), Violation>;

pub const MSG_REQUIRED: &str = "cannot be empty";
pub const MSG_INVALID_FORMAT: &str = "invalid format";
pub const MSG_INVALID_EMAIL: &str = "invalid email";
pub const MSG_INVALID_URL: &str = "invalid URL";
pub const MSG_INVALID_PHONE: &str = "invalid phone number";
pub const MSG_INVALID_ID_CARD: &str = "invalid ID number";
pub const MSG_POSITIVE_INTEGER: &str = "must be a positive integer";
pub const MSG_NUMBER: &str = "must be a valid number";
pub const MSG_CHINESE: &str = "must be Chinese text";
pub const MSG_CUSTOM: &str = "validation failed";
pub const MSG_EXECUTION: &str = "validator execution failed";
pub const MSG_NOT_TEXT: &str = "must be text";

pub const MSG_BOUNDS_NOT_NUMBERS: &str = "range bounds must be numbers";
pub const MSG_BOUNDS_INVERTED: &str = "minimum cannot exceed maximum";
pub const MSG_EMPTY_FORMAT_LIST: &str = "format list cannot be empty";
pub const MSG_BAD_PATTERN: &str = "invalid regular expression";

fn expect_text(value: &Value) -> Result<&str, Violation> {
    value
        .as_str()
        .ok_or_else(|| Violation::type_mismatch(MSG_NOT_TEXT))
}

fn match_text(value: &Value, pattern: &Regex, message: &str) -> RuleOutcome {
    let text = expect_text(value)?;
    if pattern.is_match(text) {
        Ok(())
    } else {
        Err(Violation::rule(message))
    }
}

pub fn required(value: &Value) -> RuleOutcome {
    if is_blank(value) {
        return Err(Violation::rule(MSG_REQUIRED));
    }
    Ok(())
}

pub fn min_length(value: &Value, min: usize) -> RuleOutcome {
    if length_of(value)? < min {
        return Err(Violation::rule(format!("cannot be less than {min}")));
    }
    Ok(())
}

pub fn max_length(value: &Value, max: usize) -> RuleOutcome {
    if length_of(value)? > max {
        return Err(Violation::rule(format!("cannot be more than {max}")));
    }
    Ok(())
}

pub fn length_range(value: &Value, min: usize, max: usize) -> RuleOutcome {
    if min > max {
        return Err(Violation::parameter(MSG_BOUNDS_INVERTED));
    }
    let len = length_of(value)?;
    if !(min..=max).contains(&len) {
        return Err(Violation::rule(format!("length must be between {min}-{max}")));
    }
    Ok(())
}

/// 数值范围（闭区间）；值无法转成数字时按规则失败处理
pub fn number_range(value: &Value, min: f64, max: f64) -> RuleOutcome {
    if !min.is_finite() || !max.is_finite() {
        return Err(Violation::parameter(MSG_BOUNDS_NOT_NUMBERS));
    }
    if min > max {
        return Err(Violation::parameter(MSG_BOUNDS_INVERTED));
    }
    match numeric(value) {
        Some(n) if n >= min && n <= max => Ok(()),
        _ => Err(Violation::rule(format!("value must be between {min}-{max}"))),
    }
}

/// 每个字符都必须属于标记对应字符类的并集，未知标记忽略
pub fn require_format<S: AsRef<str>>(value: &Value, tokens: &[S]) -> RuleOutcome {
    if tokens.is_empty() {
        return Err(Violation::parameter(MSG_EMPTY_FORMAT_LIST));
    }
    let text = expect_text(value)?;
    match patterns::format_matcher(tokens) {
        Some(matcher) if matcher.is_match(text) => Ok(()),
        _ => Err(Violation::rule(MSG_INVALID_FORMAT)),
    }
}

pub fn is_email(value: &Value) -> RuleOutcome {
    match_text(value, &patterns::EMAIL, MSG_INVALID_EMAIL)
}

pub fn is_url(value: &Value) -> RuleOutcome {
    match_text(value, &patterns::URL, MSG_INVALID_URL)
}

pub fn is_phone(value: &Value) -> RuleOutcome {
    match_text(value, &patterns::PHONE, MSG_INVALID_PHONE)
}

pub fn is_id_card(value: &Value) -> RuleOutcome {
    match_text(value, &patterns::ID_CARD, MSG_INVALID_ID_CARD)
}

pub fn is_positive_integer(value: &Value) -> RuleOutcome {
    match_text(value, &patterns::POSITIVE_INTEGER, MSG_POSITIVE_INTEGER)
}

pub fn is_number(value: &Value) -> RuleOutcome {
    numeric(value)
        .map(|_| ())
        .ok_or_else(|| Violation::rule(MSG_NUMBER))
}

pub fn is_chinese(value: &Value) -> RuleOutcome {
    match_text(value, &patterns::CHINESE, MSG_CHINESE)
}

/// 用调用方给出的正则匹配值的文本形式
pub fn require_regexp(value: &Value, pattern: &Regex) -> RuleOutcome {
    if pattern.is_match(&text_of(value)) {
        Ok(())
    } else {
        Err(Violation::rule(MSG_INVALID_FORMAT))
    }
}

/// 同 `require_regexp`，但模式以字符串给出，编译失败属于参数错误
pub fn require_pattern(value: &Value, pattern: &str) -> RuleOutcome {
    let compiled = Regex::new(pattern).map_err(|e| {
        tracing::debug!("Rejected pattern {:?}: {}", pattern, e);
        Violation::parameter(MSG_BAD_PATTERN)
    })?;
    require_regexp(value, &compiled)
}

pub fn custom<F>(value: &Value, predicate: F) -> RuleOutcome
where
    F: FnOnce(&Value) -> bool,
{
    try_custom(value, |v| Ok::<bool, std::convert::Infallible>(predicate(v)))
}

/// 可失败的自定义校验
///
/// 返回 `Err` 或者发生 panic 都转换成执行错误，不会传播给调用方。
pub fn try_custom<F, E>(value: &Value, predicate: F) -> RuleOutcome
where
    F: FnOnce(&Value) -> Result<bool, E>,
    E: Display,
{
    match catch_unwind(AssertUnwindSafe(|| predicate(value))) {
        Ok(Ok(true)) => Ok(()),
        Ok(Ok(false)) => Err(Violation::rule(MSG_CUSTOM)),
        Ok(Err(e)) => {
            tracing::warn!("Custom validator returned an error: {}", e);
            Err(Violation::execution(MSG_EXECUTION))
        }
        Err(_) => {
            tracing::warn!("Custom validator panicked");
            Err(Violation::execution(MSG_EXECUTION))
        }
    }
}
