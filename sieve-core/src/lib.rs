// sieve-core: 校验器的公共基础设施
//
// - 校验器选项（TOML / 环境变量）
// - 日志初始化（tracing-subscriber）
// - 统一的 Result 类型

pub mod error;
pub mod logging;
pub mod options;

pub use error::{Result, SetupError};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use options::{ValidatorOptions, DEFAULT_PASS_MESSAGE};

/// Prelude 模块，包含常用的类型
pub mod prelude {
    pub use crate::error::{Result, SetupError};
    pub use crate::logging::{LogFormat, LogLevel, LoggingConfig};
    pub use crate::options::ValidatorOptions;
    pub use anyhow::{anyhow, Context};
}
