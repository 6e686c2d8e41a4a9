/// 统一的错误处理类型
///
/// 配置加载、日志初始化等一次性的准备工作使用 anyhow::Result，
/// 通过 .context() 方法补充出错的文件或环境变量。
///
/// 规则校验本身从不返回这个类型，校验失败记录在 Validator 的状态里。
///
/// # 示例
///
/// ```rust,ignore
/// use anyhow::Context;
///
/// fn load(path: &Path) -> sieve_core::Result<ValidatorOptions> {
///     let text = std::fs::read_to_string(path)
///         .with_context(|| format!("Failed to read '{}'", path.display()))?;
///     ValidatorOptions::from_toml_str(&text)
/// }
/// ```
pub use anyhow::Result;

/// 初始化阶段的具体错误
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Logging init failed: {0}")]
    LoggingInitFailed(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidSetting { key: String, value: String },
}
