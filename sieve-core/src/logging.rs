//! 日志初始化
//!
//! 校验器本身只通过 `tracing` 发事件，是否安装订阅者由宿主程序决定。
//! 这里提供一个开箱即用的 `LoggingConfig`，方便 demo 和测试直接看到规则的执行轨迹。

use crate::error::SetupError;
use crate::Result;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// 日志级别环境变量
pub const LOG_LEVEL_ENV: &str = "SIEVE_LOG_LEVEL";

/// 日志格式环境变量
pub const LOG_FORMAT_ENV: &str = "SIEVE_LOG_FORMAT";

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = SetupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(SetupError::InvalidSetting {
                key: LOG_LEVEL_ENV.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 紧凑格式（默认）
    #[default]
    Compact,
    /// JSON 格式，便于日志平台收集
    Json,
    /// 美化格式（适合开发）
    Pretty,
}

impl FromStr for LogFormat {
    type Err = SetupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(SetupError::InvalidSetting {
                key: LOG_FORMAT_ENV.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        };
        f.write_str(name)
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别（默认：Info）
    pub level: LogLevel,

    /// 日志格式（默认：Compact）
    pub format: LogFormat,

    /// 是否显示时间戳（默认：true）
    pub show_timestamp: bool,

    /// 是否显示目标（模块路径）（默认：false）
    pub show_target: bool,

    /// 自定义过滤器，例如："sieve_validator=trace"
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            show_timestamp: true,
            show_target: false,
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// 设置日志格式
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// 设置自定义过滤器
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// 从环境变量读取配置
    ///
    /// 无法解析的值会被忽略并保留默认值。
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(rust_log) = std::env::var("RUST_LOG") {
            config.filter = Some(rust_log);
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            match level.parse() {
                Ok(level) => config.level = level,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
            match format.parse() {
                Ok(format) => config.format = format,
                Err(e) => tracing::warn!("{}", e),
            }
        }

        config
    }

    fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.level.to_string());
        match &self.filter {
            Some(filter) => EnvFilter::try_new(filter).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }

    /// 安装全局订阅者
    ///
    /// 重复调用会返回错误（全局订阅者只能设置一次）。
    pub fn init(self) -> Result<()> {
        let builder = fmt()
            .with_env_filter(self.env_filter())
            .with_target(self.show_target);

        let installed = match (self.format, self.show_timestamp) {
            (LogFormat::Compact, true) => builder.compact().try_init(),
            (LogFormat::Compact, false) => builder.compact().without_time().try_init(),
            (LogFormat::Json, true) => builder.json().try_init(),
            (LogFormat::Json, false) => builder.json().without_time().try_init(),
            (LogFormat::Pretty, true) => builder.pretty().try_init(),
            (LogFormat::Pretty, false) => builder.pretty().without_time().try_init(),
        };

        installed.map_err(|e| SetupError::LoggingInitFailed(e.to_string()))?;
        tracing::debug!("Logging initialized: level={}, format={}", self.level, self.format);
        Ok(())
    }
}
