//! 设置页选项加载

use serde::Deserialize;
use settings_common::{LoggingConfig, SettingsResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 环境变量前缀, 例如 `GO_SETTINGS__SDK__MANAGED_BY_HOST=true`
pub const ENV_PREFIX: &str = "GO_SETTINGS";

/// Go 设置页选项
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoSettingsOptions {
    /// SDK 相关选项
    pub sdk: SdkOptions,
    /// 日志选项
    pub logging: LoggingConfig,
}

/// SDK 相关选项
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SdkOptions {
    /// 宿主自行管理 SDK 时不提供 SDK 配置源
    pub managed_by_host: bool,
    /// SDK 探测候选目录
    pub search_paths: Vec<PathBuf>,
}

impl GoSettingsOptions {
    /// 从可选的配置文件和环境变量加载, 环境变量优先
    pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("加载设置页选项文件: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("sdk.search_paths")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
