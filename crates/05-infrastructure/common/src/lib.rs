//! # Settings Common
//!
//! Go 设置页各 crate 共用的错误类型与日志初始化。
//!
//! ## 核心组件
//!
//! - [`ValidationError`] - 配置源验证错误
//! - [`SettingsError`] - 基础设施错误
//! - [`LoggingConfig`] / [`init_logging`] - 日志系统初始化

pub mod errors;
pub mod logging;

pub use errors::*;
pub use logging::*;
