//! 校验器选项
//!
//! 可以从 TOML 片段、文件或环境变量加载，字段缺省时使用默认值：
//!
//! ```toml
//! pass_message = "passed"
//! label_separator = ""
//! log_failures = true
//! ```

use crate::error::SetupError;
use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// 校验通过时 `current_message` 返回的固定文本
pub const DEFAULT_PASS_MESSAGE: &str = "passed";

pub const PASS_MESSAGE_ENV: &str = "SIEVE_PASS_MESSAGE";
pub const LABEL_SEPARATOR_ENV: &str = "SIEVE_LABEL_SEPARATOR";
pub const LOG_FAILURES_ENV: &str = "SIEVE_LOG_FAILURES";

/// 单个 Validator 会话的行为选项
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// 通过状态下的提示文本（默认："passed"）
    pub pass_message: String,

    /// 插在标签和错误消息之间的分隔符（默认为空，即直接拼接）
    pub label_separator: String,

    /// 记录失败时是否输出 debug 日志（默认：true）
    pub log_failures: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            pass_message: DEFAULT_PASS_MESSAGE.to_string(),
            label_separator: String::new(),
            log_failures: true,
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass_message(mut self, message: impl Into<String>) -> Self {
        self.pass_message = message.into();
        self
    }

    pub fn label_separator(mut self, separator: impl Into<String>) -> Self {
        self.label_separator = separator.into();
        self
    }

    pub fn log_failures(mut self, enabled: bool) -> Self {
        self.log_failures = enabled;
        self
    }

    /// 拼接带标签的错误消息
    pub fn prefix(&self, label: &str, message: &str) -> String {
        if label.is_empty() {
            return message.to_string();
        }
        let mut out =
            String::with_capacity(label.len() + self.label_separator.len() + message.len());
        out.push_str(label);
        out.push_str(&self.label_separator);
        out.push_str(message);
        out
    }

    /// 从 TOML 文本解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Self =
            toml::from_str(content).context("Failed to parse validator options TOML")?;
        Ok(options)
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid validator options in {}", path.display()))
    }

    /// 在默认值基础上叠加环境变量
    ///
    /// 与日志配置不同，这里的非法取值直接报错，而不是静默忽略。
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// 用给定的查找函数叠加配置，便于测试时不依赖进程环境
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(message) = lookup(PASS_MESSAGE_ENV) {
            self.pass_message = message;
        }
        if let Some(separator) = lookup(LABEL_SEPARATOR_ENV) {
            self.label_separator = separator;
        }
        if let Some(raw) = lookup(LOG_FAILURES_ENV) {
            self.log_failures = parse_bool(&raw).ok_or_else(|| SetupError::InvalidSetting {
                key: LOG_FAILURES_ENV.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let options = ValidatorOptions::default();
        assert_eq!(options.pass_message, "passed");
        assert_eq!(options.label_separator, "");
        assert!(options.log_failures);
    }

    #[test]
    fn test_prefix_concatenates_without_separator() {
        let options = ValidatorOptions::default();
        assert_eq!(options.prefix("Username", "cannot be empty"), "Usernamecannot be empty");
        assert_eq!(options.prefix("", "cannot be empty"), "cannot be empty");
    }

    #[test]
    fn test_prefix_with_separator() {
        let options = ValidatorOptions::new().label_separator(": ");
        assert_eq!(options.prefix("Email", "invalid email"), "Email: invalid email");
    }

    #[test]
    fn test_from_toml_partial() {
        let options = ValidatorOptions::from_toml_str(
            r#"
            label_separator = " - "
            log_failures = false
            "#,
        )
        .unwrap();
        assert_eq!(options.pass_message, DEFAULT_PASS_MESSAGE);
        assert_eq!(options.label_separator, " - ");
        assert!(!options.log_failures);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(ValidatorOptions::from_toml_str("colour = \"red\"").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = ValidatorOptions::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_merge_env() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (PASS_MESSAGE_ENV, "ok"),
            (LOG_FAILURES_ENV, "no"),
        ]);
        let options = ValidatorOptions::default()
            .merge_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(options.pass_message, "ok");
        assert_eq!(options.label_separator, "");
        assert!(!options.log_failures);
    }

    #[test]
    fn test_merge_env_rejects_bad_bool() {
        let err = ValidatorOptions::default()
            .merge_env(|key| (key == LOG_FAILURES_ENV).then(|| "maybe".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value 'maybe' for SIEVE_LOG_FAILURES");
    }
}
