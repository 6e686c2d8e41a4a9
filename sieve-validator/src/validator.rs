use crate::error::{ValidationError, ValidationResult};
use crate::rules::{self, RuleOutcome};
use regex::Regex;
use serde_json::Value;
use sieve_core::ValidatorOptions;

/// 校验链的状态
///
/// 只有两个状态：`Passing` 是初始状态，第一次失败后进入 `Failed`，
/// 之后只有 `Validator::reset` 能回到 `Passing`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainState {
    #[default]
    Passing,
    Failed,
}

impl ChainState {
    /// 根据一条规则的结果计算下一个状态
    pub fn advance(self, outcome: &RuleOutcome) -> Self {
        match (self, outcome) {
            (ChainState::Failed, _) => ChainState::Failed,
            (ChainState::Passing, Ok(())) => ChainState::Passing,
            (ChainState::Passing, Err(_)) => ChainState::Failed,
        }
    }

    pub fn is_passing(self) -> bool {
        self == ChainState::Passing
    }
}

/// 链式字段校验器
///
/// 绑定一个值和一个标签，然后依次调用规则方法。第一条失败的规则记录一条
/// 带标签前缀的错误消息，之后的所有规则（以及 `set_value` / `set_label`）都不再执行，
/// 直到调用 `reset`。
///
/// ```
/// use sieve_validator::Validator;
///
/// let mut username = Validator::with_label("", "Username");
/// username.is_required().min_length(3);
///
/// assert!(!username.passed());
/// assert_eq!(username.current_message(), "Usernamecannot be empty");
/// assert_eq!(username.get_all_errors().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    value: Value,
    label: String,
    state: ChainState,
    errors: Vec<ValidationError>,
    options: ValidatorOptions,
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_options(Value::Null, String::new(), ValidatorOptions::default())
    }
}

impl Validator {
    pub fn new(value: impl Into<Value>) -> Self {
        Self::with_label(value, String::new())
    }

    pub fn with_label(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::with_options(value, label, ValidatorOptions::default())
    }

    pub fn with_options(
        value: impl Into<Value>,
        label: impl Into<String>,
        options: ValidatorOptions,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            state: ChainState::Passing,
            errors: Vec::new(),
            options,
        }
    }

    // ------------------------------------------------------------------
    // 状态
    // ------------------------------------------------------------------

    pub fn passed(&self) -> bool {
        self.state.is_passing()
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// 最近一条错误消息（已带标签），通过时返回固定的通过文本
    pub fn current_message(&self) -> &str {
        match self.errors.last() {
            Some(error) => &error.message,
            None => &self.options.pass_message,
        }
    }

    /// 已记录的错误消息副本，修改返回值不会影响校验器
    pub fn get_all_errors(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// 结构化的错误记录
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// 以 `Result` 形式取出结果，便于配合 `?` 使用
    pub fn check(&self) -> ValidationResult<()> {
        match self.errors.first() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    pub fn into_result(self) -> ValidationResult<Value> {
        self.check()?;
        Ok(self.value)
    }

    // ------------------------------------------------------------------
    // 修改
    // ------------------------------------------------------------------

    /// 替换待校验的值；已失败时不做任何事
    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        if self.passed() {
            self.value = value.into();
        }
        self
    }

    /// 替换标签；已失败时不做任何事
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        if self.passed() {
            self.label = label.into();
        }
        self
    }

    /// 回到通过状态并清空错误，保留值和标签
    ///
    /// 唯一不受短路影响的方法。
    pub fn reset(&mut self) -> &mut Self {
        self.state = ChainState::Passing;
        self.errors.clear();
        self
    }

    /// 所有规则方法的公共入口
    fn apply<F>(&mut self, rule: &'static str, message: Option<&str>, check: F) -> &mut Self
    where
        F: FnOnce(&Value) -> RuleOutcome,
    {
        if !self.passed() {
            return self;
        }

        let outcome = check(&self.value).map_err(|v| v.override_message(message));
        self.state = self.state.advance(&outcome);

        match outcome {
            Ok(()) => tracing::trace!("Rule '{}' passed for '{}'", rule, self.label),
            Err(violation) => {
                let message = self.options.prefix(&self.label, &violation.message);
                if self.options.log_failures {
                    tracing::debug!(
                        rule,
                        kind = %violation.kind,
                        label = %self.label,
                        "Validation failed: {}",
                        message
                    );
                }
                self.errors
                    .push(ValidationError::new(rule, violation.kind, message));
            }
        }

        self
    }

    // ------------------------------------------------------------------
    // 规则
    // ------------------------------------------------------------------

    /// 不能为 null、纯空白字符串、空数组或空对象
    pub fn is_required(&mut self) -> &mut Self {
        self.apply("is_required", None, rules::required)
    }

    pub fn is_required_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_required", Some(message), rules::required)
    }

    /// 长度不小于 `min`
    pub fn min_length(&mut self, min: usize) -> &mut Self {
        self.apply("min_length", None, |v| rules::min_length(v, min))
    }

    pub fn min_length_with_message(&mut self, min: usize, message: &str) -> &mut Self {
        self.apply("min_length", Some(message), |v| rules::min_length(v, min))
    }

    /// 长度不大于 `max`
    pub fn max_length(&mut self, max: usize) -> &mut Self {
        self.apply("max_length", None, |v| rules::max_length(v, max))
    }

    pub fn max_length_with_message(&mut self, max: usize, message: &str) -> &mut Self {
        self.apply("max_length", Some(message), |v| rules::max_length(v, max))
    }

    /// 长度在 `[min, max]` 之间
    pub fn length_range(&mut self, min: usize, max: usize) -> &mut Self {
        self.apply("length_range", None, |v| rules::length_range(v, min, max))
    }

    pub fn length_range_with_message(&mut self, min: usize, max: usize, message: &str) -> &mut Self {
        self.apply("length_range", Some(message), |v| {
            rules::length_range(v, min, max)
        })
    }

    /// 数值在 `[min, max]` 之间，字符串会先尝试转成数字
    pub fn number_range(&mut self, min: f64, max: f64) -> &mut Self {
        self.apply("number_range", None, |v| rules::number_range(v, min, max))
    }

    pub fn number_range_with_message(&mut self, min: f64, max: f64, message: &str) -> &mut Self {
        self.apply("number_range", Some(message), |v| {
            rules::number_range(v, min, max)
        })
    }

    /// 只允许给定格式标记（"number"、"letter"、"chinese"）中的字符
    pub fn require_format<S: AsRef<str>>(&mut self, tokens: &[S]) -> &mut Self {
        self.apply("require_format", None, |v| rules::require_format(v, tokens))
    }

    pub fn require_format_with_message<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        message: &str,
    ) -> &mut Self {
        self.apply("require_format", Some(message), |v| {
            rules::require_format(v, tokens)
        })
    }

    pub fn is_email(&mut self) -> &mut Self {
        self.apply("is_email", None, rules::is_email)
    }

    pub fn is_email_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_email", Some(message), rules::is_email)
    }

    pub fn is_url(&mut self) -> &mut Self {
        self.apply("is_url", None, rules::is_url)
    }

    pub fn is_url_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_url", Some(message), rules::is_url)
    }

    pub fn is_phone(&mut self) -> &mut Self {
        self.apply("is_phone", None, rules::is_phone)
    }

    pub fn is_phone_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_phone", Some(message), rules::is_phone)
    }

    pub fn is_id_card(&mut self) -> &mut Self {
        self.apply("is_id_card", None, rules::is_id_card)
    }

    pub fn is_id_card_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_id_card", Some(message), rules::is_id_card)
    }

    pub fn is_positive_integer(&mut self) -> &mut Self {
        self.apply("is_positive_integer", None, rules::is_positive_integer)
    }

    pub fn is_positive_integer_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_positive_integer", Some(message), rules::is_positive_integer)
    }

    pub fn is_number(&mut self) -> &mut Self {
        self.apply("is_number", None, rules::is_number)
    }

    pub fn is_number_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_number", Some(message), rules::is_number)
    }

    pub fn is_chinese(&mut self) -> &mut Self {
        self.apply("is_chinese", None, rules::is_chinese)
    }

    pub fn is_chinese_with_message(&mut self, message: &str) -> &mut Self {
        self.apply("is_chinese", Some(message), rules::is_chinese)
    }

    /// 用已编译的正则匹配值的文本形式
    pub fn require_regexp(&mut self, pattern: &Regex) -> &mut Self {
        self.apply("require_regexp", None, |v| rules::require_regexp(v, pattern))
    }

    pub fn require_regexp_with_message(&mut self, pattern: &Regex, message: &str) -> &mut Self {
        self.apply("require_regexp", Some(message), |v| {
            rules::require_regexp(v, pattern)
        })
    }

    /// 模式以字符串给出，无法编译时记录参数错误
    pub fn require_pattern(&mut self, pattern: &str) -> &mut Self {
        self.apply("require_pattern", None, |v| rules::require_pattern(v, pattern))
    }

    pub fn require_pattern_with_message(&mut self, pattern: &str, message: &str) -> &mut Self {
        self.apply("require_pattern", Some(message), |v| {
            rules::require_pattern(v, pattern)
        })
    }

    /// 自定义校验，返回 false 视为失败
    pub fn custom<F>(&mut self, predicate: F) -> &mut Self
    where
        F: FnOnce(&Value) -> bool,
    {
        self.apply("custom", None, |v| rules::custom(v, predicate))
    }

    pub fn custom_with_message<F>(&mut self, predicate: F, message: &str) -> &mut Self
    where
        F: FnOnce(&Value) -> bool,
    {
        self.apply("custom", Some(message), |v| rules::custom(v, predicate))
    }

    /// 可失败的自定义校验，`Err` 记为 "validator execution failed"
    pub fn try_custom<F, E>(&mut self, predicate: F) -> &mut Self
    where
        F: FnOnce(&Value) -> Result<bool, E>,
        E: std::fmt::Display,
    {
        self.apply("custom", None, |v| rules::try_custom(v, predicate))
    }

    pub fn try_custom_with_message<F, E>(&mut self, predicate: F, message: &str) -> &mut Self
    where
        F: FnOnce(&Value) -> Result<bool, E>,
        E: std::fmt::Display,
    {
        self.apply("custom", Some(message), |v| rules::try_custom(v, predicate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_short_circuit_keeps_first_error() {
        let mut v = Validator::new("");
        v.is_required().min_length(3);

        assert!(!v.passed());
        assert_eq!(v.get_all_errors(), vec!["cannot be empty".to_string()]);
        assert_eq!(v.errors()[0].rule, "is_required");
    }

    #[test]
    fn test_failed_chain_ignores_mutators_and_predicates() {
        let calls = Cell::new(0);
        let mut v = Validator::with_label("ab", "Name");
        v.min_length(3)
            .set_value("abcdef")
            .set_label("Other")
            .custom(|_| {
                calls.set(calls.get() + 1);
                true
            })
            .is_email();

        assert_eq!(calls.get(), 0);
        assert_eq!(v.value(), &json!("ab"));
        assert_eq!(v.label(), "Name");
        assert_eq!(v.state(), ChainState::Failed);
        assert_eq!(v.get_all_errors(), vec!["Namecannot be less than 3".to_string()]);
    }

    #[test]
    fn test_passing_chain() {
        let mut v = Validator::with_label("user@example.com", "Email");
        v.is_required().length_range(5, 64).is_email();

        assert!(v.passed());
        assert_eq!(v.current_message(), "passed");
        assert!(v.get_all_errors().is_empty());
        assert!(v.check().is_ok());
    }

    #[test]
    fn test_label_prefixing() {
        let mut v = Validator::with_label("", "Username");
        v.is_required_with_message("cannot be empty");
        assert_eq!(v.current_message(), "Usernamecannot be empty");
    }

    #[test]
    fn test_message_override() {
        let mut v = Validator::with_label("12345678901", "Phone ");
        v.is_phone_with_message("looks wrong");
        assert_eq!(v.current_message(), "Phone looks wrong");
    }

    #[test]
    fn test_override_does_not_hide_type_errors() {
        let mut v = Validator::new(42);
        v.is_email_with_message("bad email");
        assert_eq!(v.current_message(), "must be text");
        assert_eq!(v.errors()[0].kind, FailureKind::TypeMismatch);
    }

    #[test]
    fn test_reset_restores_passing_state() {
        let mut v = Validator::with_label("x", "Code");
        v.min_length(2);
        assert!(!v.passed());

        v.reset();
        assert!(v.passed());
        assert!(v.get_all_errors().is_empty());
        assert_eq!(v.current_message(), "passed");
        assert_eq!(v.value(), &json!("x"));
        assert_eq!(v.label(), "Code");

        v.reset();
        assert!(v.passed());
        assert!(v.errors().is_empty());
    }

    #[test]
    fn test_reset_allows_reuse_for_another_field() {
        let mut v = Validator::with_label("", "Username");
        v.is_required();
        assert!(!v.passed());

        v.reset().set_value("13800138000").set_label("Phone").is_phone();
        assert!(v.passed());

        v.set_value("1380013800").is_phone();
        assert_eq!(v.get_all_errors(), vec!["Phoneinvalid phone number".to_string()]);
    }

    #[test]
    fn test_get_all_errors_returns_copy() {
        let mut v = Validator::new(Value::Null);
        v.is_required();

        let mut copy = v.get_all_errors();
        copy.push("tampered".to_string());
        copy[0].clear();

        assert_eq!(v.get_all_errors(), vec!["cannot be empty".to_string()]);
    }

    #[test]
    fn test_number_range() {
        let mut ok = Validator::new(50);
        ok.number_range(1.0, 100.0);
        assert!(ok.passed());

        let mut too_big = Validator::new(150);
        too_big.number_range(1.0, 100.0);
        assert_eq!(too_big.current_message(), "value must be between 1-100");
    }

    #[test]
    fn test_parameter_error_short_circuits() {
        let mut v = Validator::new(5);
        v.number_range(f64::NAN, 10.0).is_number();
        assert_eq!(v.get_all_errors(), vec!["range bounds must be numbers".to_string()]);
        assert_eq!(v.errors()[0].kind, FailureKind::Parameter);
    }

    #[test]
    fn test_require_format() {
        let mut ok = Validator::new("abc123");
        ok.require_format(&["letter", "number"]);
        assert!(ok.passed());

        let mut bad = Validator::new("abc123!");
        bad.require_format(&["letter", "number"]);
        assert_eq!(bad.current_message(), "invalid format");
    }

    #[test]
    fn test_custom_error_is_contained() {
        let mut v = Validator::new("x");
        v.try_custom(|_| Err::<bool, _>("lookup failed")).is_required();

        assert!(!v.passed());
        assert_eq!(v.current_message(), "validator execution failed");
        assert_eq!(v.errors()[0].kind, FailureKind::Execution);
    }

    #[test]
    fn test_custom_panic_is_contained() {
        let mut v = Validator::new("x");
        v.custom(|_| panic!("predicate blew up"));
        assert_eq!(v.current_message(), "validator execution failed");
    }

    #[test]
    fn test_custom_with_message() {
        let mut v = Validator::with_label(json!(["a", "b"]), "Tags");
        v.custom_with_message(|v| v.as_array().map_or(false, |a| a.len() > 2), "need three tags");
        assert_eq!(v.current_message(), "Tagsneed three tags");
    }

    #[test]
    fn test_require_regexp_and_pattern() {
        let zip = Regex::new(r"^\d{6}$").unwrap();
        let mut v = Validator::new(100080);
        v.require_regexp(&zip);
        assert!(v.passed());

        let mut bad = Validator::new("abc");
        bad.require_pattern("(unclosed");
        assert_eq!(bad.current_message(), "invalid regular expression");
    }

    #[test]
    fn test_options_shape_messages() {
        let options = ValidatorOptions::new()
            .pass_message("ok")
            .label_separator(": ")
            .log_failures(false);

        let mut v = Validator::with_options("", "City", options.clone());
        assert_eq!(v.current_message(), "ok");
        v.is_chinese();
        assert_eq!(v.current_message(), "City: must be Chinese text");

        let mut unlabelled = Validator::with_options("", "", options);
        unlabelled.is_required();
        assert_eq!(unlabelled.current_message(), "cannot be empty");
    }

    #[test]
    fn test_into_result() {
        let mut good = Validator::new("42");
        good.is_positive_integer();
        assert_eq!(good.into_result().unwrap(), json!("42"));

        let mut bad = Validator::with_label("042", "Count");
        bad.is_positive_integer();
        let err = bad.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Countmust be a positive integer");
        assert_eq!(err.rule, "is_positive_integer");
    }

    #[test]
    fn test_default_validator() {
        let mut v = Validator::default();
        assert_eq!(v.value(), &Value::Null);
        v.min_length(1);
        assert_eq!(v.current_message(), "data cannot be empty");
    }

    #[test]
    fn test_state_advance() {
        let failure: RuleOutcome = Err(crate::error::Violation::rule("x"));
        assert_eq!(ChainState::Passing.advance(&Ok(())), ChainState::Passing);
        assert_eq!(ChainState::Passing.advance(&failure), ChainState::Failed);
        assert_eq!(ChainState::Failed.advance(&Ok(())), ChainState::Failed);
    }
}
