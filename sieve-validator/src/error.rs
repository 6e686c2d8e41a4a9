use std::fmt;
use thiserror::Error;

/// 失败原因分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// 规则参数本身不合法（范围边界不是数字、正则无法编译等）
    Parameter,
    /// 值的形状不符合规则要求（不是文本、没有长度）
    TypeMismatch,
    /// 规则正常执行，但条件不成立
    Rule,
    /// 自定义校验函数执行出错
    Execution,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Parameter => "parameter",
            FailureKind::TypeMismatch => "type_mismatch",
            FailureKind::Rule => "rule",
            FailureKind::Execution => "execution",
        };
        f.write_str(name)
    }
}

/// 规则函数的失败结果，尚未加上标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: FailureKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn parameter(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Parameter, message)
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(FailureKind::TypeMismatch, message)
    }

    pub fn rule(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Rule, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Execution, message)
    }

    /// 用调用方的消息替换规则失败的默认文本
    ///
    /// 只替换 `Rule` 类失败；参数、类型和执行错误保留各自的固定消息。
    pub fn override_message(mut self, message: Option<&str>) -> Self {
        if let (FailureKind::Rule, Some(custom)) = (self.kind, message) {
            self.message = custom.to_string();
        }
        self
    }
}

/// 一次被记录的校验失败
///
/// `message` 已经带上了标签前缀。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// 规则名，例如 "min_length"
    pub rule: &'static str,
    pub kind: FailureKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(rule: &'static str, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            rule,
            kind,
            message: message.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
