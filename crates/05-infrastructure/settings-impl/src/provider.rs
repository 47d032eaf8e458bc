//! Go 设置页提供者

use crate::build_target::{BuildTargetProvider, BuildTargetSettings};
use crate::composite::{CompositeConfigurable, GO_CONFIGURABLE_ID, GO_DISPLAY_NAME};
use crate::libraries::{LibrariesProvider, LibrariesSettings};
use crate::options::GoSettingsOptions;
use crate::sdk::{LocalSdkService, SdkSettings};
use crate::staged::SharedSettings;
use settings_abstractions::{ConfigSourceProvider, SettingsEventListener};
use std::sync::Arc;
use tracing::{debug, info};

/// Go 设置页提供者
///
/// 组合 SDK、构建目标和库路径三个配置源, 顺序固定为 `[sdk?, build target, libraries]`。
/// SDK 服务不提供配置源时直接省略。
pub struct GoConfigurableProvider {
    sdk: Arc<dyn ConfigSourceProvider>,
    build_target: Arc<dyn ConfigSourceProvider>,
    libraries: Arc<dyn ConfigSourceProvider>,
    listeners: Vec<Arc<dyn SettingsEventListener>>,
}

impl std::fmt::Debug for GoConfigurableProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoConfigurableProvider")
            .field("sdk", &self.sdk.name())
            .field("build_target", &self.build_target.name())
            .field("libraries", &self.libraries.name())
            .field("listeners_count", &self.listeners.len())
            .finish()
    }
}

impl GoConfigurableProvider {
    /// 使用任意配置源提供者创建
    pub fn new(
        sdk: Arc<dyn ConfigSourceProvider>,
        build_target: Arc<dyn ConfigSourceProvider>,
        libraries: Arc<dyn ConfigSourceProvider>,
    ) -> Self {
        Self {
            sdk,
            build_target,
            libraries,
            listeners: Vec::new(),
        }
    }

    /// 基于共享设置和选项创建默认提供者
    pub fn from_options(options: &GoSettingsOptions, stores: &GoSettingsStores) -> Self {
        let sdk = LocalSdkService::new(stores.sdk.clone())
            .with_search_paths(options.sdk.search_paths.iter().cloned())
            .with_managed_by_host(options.sdk.managed_by_host);

        Self::new(
            Arc::new(sdk),
            Arc::new(BuildTargetProvider::new(stores.build_target.clone())),
            Arc::new(LibrariesProvider::new(stores.libraries.clone())),
        )
    }

    /// 为创建出的设置页注册事件监听器
    pub fn with_listener(mut self, listener: Arc<dyn SettingsEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// 创建 Go 设置页
    pub async fn create_configurable(&self) -> CompositeConfigurable {
        let sdk = self.sdk.create_source().await;
        if sdk.is_none() {
            debug!("{} 未提供 SDK 配置源", self.sdk.name());
        }

        let mut builder = CompositeConfigurable::builder()
            .id(GO_CONFIGURABLE_ID)
            .display_name(GO_DISPLAY_NAME)
            .optional_source(sdk)
            .optional_source(self.build_target.create_source().await)
            .optional_source(self.libraries.create_source().await);

        for listener in &self.listeners {
            builder = builder.listener(Arc::clone(listener));
        }

        let configurable = builder.build();
        info!(
            "Go 设置页创建完成, 配置源: {:?}",
            configurable.source_ids()
        );
        configurable
    }
}

/// Go 设置页使用的共享设置
///
/// 由宿主持有, 代表外部设置存储中已应用的值。
#[derive(Debug, Clone, Default)]
pub struct GoSettingsStores {
    /// SDK 设置
    pub sdk: SharedSettings<SdkSettings>,
    /// 构建目标设置
    pub build_target: SharedSettings<BuildTargetSettings>,
    /// 库路径设置
    pub libraries: SharedSettings<LibrariesSettings>,
}
