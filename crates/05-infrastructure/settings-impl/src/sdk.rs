//! Go SDK 配置源与 SDK 服务

use crate::staged::{SharedSettings, StagedSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use settings_abstractions::{ConfigSource, ConfigSourceProvider, SettingsValidator};
use settings_common::ValidationError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// SDK 配置源标识
pub const SDK_SOURCE_ID: &str = "go.sdk";

/// SDK 配置源显示名称
pub const SDK_SOURCE_LABEL: &str = "Go SDK";

/// SDK 配置源帮助主题
pub const SDK_HELP_TOPIC: &str = "go.settings.sdk";

/// SDK 根目录下的可执行文件相对路径
const GO_BINARIES: [&str; 2] = ["bin/go", "bin/go.exe"];

/// Go SDK 设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkSettings {
    /// SDK 根目录, 未选择时为 `None`
    pub sdk_path: Option<PathBuf>,
    /// SDK 版本
    pub version: Option<String>,
}

impl SdkSettings {
    /// 指向某个 SDK 根目录
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            sdk_path: Some(path.into()),
            version: None,
        }
    }
}

/// 同步判断目录是否为 Go SDK 根目录
pub fn is_sdk_root(path: &Path) -> bool {
    path.is_dir() && GO_BINARIES.iter().any(|bin| path.join(bin).is_file())
}

/// SDK 设置验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkValidator;

impl SettingsValidator<SdkSettings> for SdkValidator {
    fn validate(&self, source_id: &str, settings: &SdkSettings) -> Result<(), ValidationError> {
        let Some(path) = &settings.sdk_path else {
            return Ok(());
        };

        if path.as_os_str().is_empty() {
            return Err(ValidationError::required_field_missing(source_id, "sdk_path"));
        }

        if !path.is_dir() {
            return Err(ValidationError::invalid_field_value(
                source_id,
                "sdk_path",
                path.display().to_string(),
                "目录不存在",
            ));
        }

        if !is_sdk_root(path) {
            return Err(ValidationError::invalid_field_value(
                source_id,
                "sdk_path",
                path.display().to_string(),
                "不是有效的 Go SDK 目录 (缺少 bin/go)",
            ));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "SdkValidator"
    }
}

/// 创建 SDK 配置源
pub fn sdk_source(applied: SharedSettings<SdkSettings>) -> StagedSource<SdkSettings> {
    StagedSource::new(SDK_SOURCE_ID, SDK_SOURCE_LABEL, applied)
        .with_validator(SdkValidator)
        .with_help_topic(SDK_HELP_TOPIC)
}

/// 本地 SDK 服务
///
/// 宿主自行管理 SDK 时不提供配置源; 否则在候选目录中探测 SDK,
/// 尚未选择 SDK 时把探测结果放入编辑副本, 由 `apply` 提交。
#[derive(Debug, Clone)]
pub struct LocalSdkService {
    settings: SharedSettings<SdkSettings>,
    search_paths: Vec<PathBuf>,
    managed_by_host: bool,
}

impl LocalSdkService {
    /// 创建新的 SDK 服务
    pub fn new(settings: SharedSettings<SdkSettings>) -> Self {
        Self {
            settings,
            search_paths: Vec::new(),
            managed_by_host: false,
        }
    }

    /// 设置候选目录, 按顺序探测
    pub fn with_search_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.search_paths = paths.into_iter().collect();
        self
    }

    /// 是否由宿主管理 SDK
    pub fn with_managed_by_host(mut self, managed: bool) -> Self {
        self.managed_by_host = managed;
        self
    }

    /// 候选目录: 配置的搜索路径, 然后是 `GOROOT`
    fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = self.search_paths.clone();
        if let Some(goroot) = std::env::var_os("GOROOT") {
            candidates.push(PathBuf::from(goroot));
        }
        candidates
    }

    /// 在候选目录中探测第一个 SDK
    pub async fn detect(&self) -> Option<SdkSettings> {
        for candidate in self.candidates() {
            if let Some(sdk) = probe_sdk(&candidate).await {
                info!("探测到 Go SDK: {}", candidate.display());
                return Some(sdk);
            }
            debug!("不是 Go SDK 目录: {}", candidate.display());
        }
        None
    }
}

/// 异步探测目录是否为 SDK 根目录, 并读取 `VERSION` 文件
pub async fn probe_sdk(path: &Path) -> Option<SdkSettings> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return None,
    }

    let mut has_binary = false;
    for bin in GO_BINARIES {
        if let Ok(meta) = tokio::fs::metadata(path.join(bin)).await {
            if meta.is_file() {
                has_binary = true;
                break;
            }
        }
    }
    if !has_binary {
        return None;
    }

    let version = match tokio::fs::read_to_string(path.join("VERSION")).await {
        Ok(content) => content.lines().next().map(|line| line.trim().to_string()),
        Err(e) => {
            warn!("读取 SDK 版本失败: {}: {}", path.display(), e);
            None
        }
    };

    Some(SdkSettings {
        sdk_path: Some(path.to_path_buf()),
        version,
    })
}

#[async_trait]
impl ConfigSourceProvider for LocalSdkService {
    async fn create_source(&self) -> Option<Box<dyn ConfigSource>> {
        if self.managed_by_host {
            debug!("SDK 由宿主管理, 不提供 SDK 配置源");
            return None;
        }

        let mut source = sdk_source(self.settings.clone());
        if source.edited().sdk_path.is_none() {
            if let Some(detected) = self.detect().await {
                source.set_edited(detected);
            }
        }

        Some(Box::new(source))
    }

    fn name(&self) -> &str {
        "LocalSdkService"
    }
}
