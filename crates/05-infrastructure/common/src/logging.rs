//! 日志系统初始化

use crate::errors::{SettingsError, SettingsResult};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志过滤指令, 例如 `info` 或 `settings_impl=debug`
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名和行号
    pub show_location: bool,
    /// 是否使用 JSON 格式
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_location: false,
            json: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            show_target: true,
            show_thread_ids: true,
            show_location: true,
            json: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
            show_thread_ids: false,
            show_location: false,
            json: true,
        }
    }

    /// 构造过滤器, `RUST_LOG` 优先于配置中的级别
    fn env_filter(&self) -> SettingsResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => self.level_filter(),
        }
    }

    /// 只按配置中的级别构造过滤器
    fn level_filter(&self) -> SettingsResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| SettingsError::LoggingInitFailed {
            message: format!("无效的日志过滤指令 {:?}: {}", self.level, e),
        })
    }
}

/// 初始化全局日志订阅者
///
/// 重复初始化会返回 [`SettingsError::LoggingInitFailed`]。
pub fn init_logging(config: &LoggingConfig) -> SettingsResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_location)
        .with_line_number(config.show_location);

    if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| SettingsError::LoggingInitFailed {
        message: e.to_string(),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}
