//! 组合设置页实现

use settings_abstractions::{is_interested, ConfigSource, SettingsEvent, SettingsEventListener};
use settings_common::ValidationResult;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Go 设置页标识
pub const GO_CONFIGURABLE_ID: &str = "go";

/// Go 设置页在多配置源时的显示名称
pub const GO_DISPLAY_NAME: &str = "Go";

/// 组合设置页
///
/// 按声明顺序持有若干配置源, 对外提供统一的 validate/apply/reset 约定。
/// 只有一个配置源时为透传模式, 各操作结果与该配置源完全一致。
pub struct CompositeConfigurable {
    /// 设置页标识
    id: String,
    /// 多配置源时的显示名称
    display_name: String,
    /// 配置源序列, 释放后为 `None`
    sources: Option<Vec<Box<dyn ConfigSource>>>,
    /// 事件监听器
    listeners: Vec<Arc<dyn SettingsEventListener>>,
}

impl std::fmt::Debug for CompositeConfigurable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeConfigurable")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("sources", &self.source_ids())
            .field("listeners_count", &self.listeners.len())
            .finish()
    }
}

impl CompositeConfigurable {
    /// 创建新的组合设置页
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        sources: Vec<Box<dyn ConfigSource>>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            sources: Some(sources),
            listeners: Vec::new(),
        }
    }

    /// 使用 Go 设置页的标识和显示名称创建
    pub fn go(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self::new(GO_CONFIGURABLE_ID, GO_DISPLAY_NAME, sources)
    }

    /// 创建构建器
    pub fn builder() -> CompositeConfigurableBuilder {
        CompositeConfigurableBuilder::new()
    }

    fn sources(&self) -> &[Box<dyn ConfigSource>] {
        self.sources.as_deref().unwrap_or(&[])
    }

    fn sources_mut(&mut self) -> &mut [Box<dyn ConfigSource>] {
        self.sources.as_deref_mut().unwrap_or(&mut [])
    }

    /// 设置页标识
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 是否处于透传模式
    pub fn is_passthrough(&self) -> bool {
        self.sources().len() == 1
    }

    /// 透传模式下才有自身内容, 否则内容由子项承载
    pub fn has_own_content(&self) -> bool {
        self.is_passthrough()
    }

    /// 配置源数量
    pub fn source_count(&self) -> usize {
        self.sources().len()
    }

    /// 按声明顺序列出配置源标识
    pub fn source_ids(&self) -> Vec<&str> {
        self.sources().iter().map(|s| s.id()).collect()
    }

    /// 作为子项展示的配置源, 透传模式下为空
    pub fn children(&self) -> &[Box<dyn ConfigSource>] {
        match self.sources() {
            [_] => &[],
            all => all,
        }
    }

    /// 按标识查找配置源
    pub fn source(&self, id: &str) -> Option<&dyn ConfigSource> {
        self.sources()
            .iter()
            .find(|s| s.id() == id)
            .map(|s| &**s)
    }

    /// 按标识查找配置源 (可变)
    pub fn source_mut(&mut self, id: &str) -> Option<&mut (dyn ConfigSource + 'static)> {
        self.sources_mut()
            .iter_mut()
            .find(|s| s.id() == id)
            .map(|s| &mut **s)
    }

    /// 按标识查找并转换为具体类型
    pub fn source_as<S: ConfigSource + 'static>(&self, id: &str) -> Option<&S> {
        self.source(id)?.as_any().downcast_ref::<S>()
    }

    /// 按标识查找并转换为具体类型 (可变)
    pub fn source_as_mut<S: ConfigSource + 'static>(&mut self, id: &str) -> Option<&mut S> {
        self.source_mut(id)?.as_any_mut().downcast_mut::<S>()
    }

    /// 注册事件监听器
    pub fn add_listener(&mut self, listener: Arc<dyn SettingsEventListener>) {
        info!("注册设置事件监听器: {}", listener.name());
        self.listeners.push(listener);
    }

    fn publish(&self, event: SettingsEvent) {
        for listener in &self.listeners {
            if is_interested(listener.as_ref(), &event) {
                debug!("分发设置事件 {:?} -> {}", event.event_type, listener.name());
                listener.on_settings_event(&event);
            }
        }
    }

    /// 是否存在未应用的修改
    ///
    /// 透传模式委托给唯一的配置源, 否则为所有配置源的逻辑或。
    pub fn is_modified(&self) -> bool {
        match self.sources() {
            [single] => single.is_modified(),
            all => all.iter().any(|s| s.is_modified()),
        }
    }

    /// 校验所有配置源但不提交, 返回第一个失败
    pub fn validate(&self) -> ValidationResult<()> {
        self.sources().iter().try_for_each(|s| s.validate())
    }

    /// 应用配置
    ///
    /// 按声明顺序应用, 遇到第一个失败即停止: 之前的配置源保持已提交,
    /// 之后的配置源不做处理, 不会自动回滚。失败的验证错误原样返回。
    pub fn apply(&mut self) -> ValidationResult<()> {
        let result = match self.sources_mut() {
            [single] => {
                debug!("透传应用: {}", single.id());
                single.apply()
            }
            all => all.iter_mut().try_for_each(|source| {
                debug!("应用配置源: {}", source.id());
                source.apply()
            }),
        };

        match result {
            Ok(()) => {
                info!("设置页 {} 应用完成", self.id);
                self.publish(SettingsEvent::applied(&self.id));
                Ok(())
            }
            Err(e) => {
                warn!("设置页 {} 应用失败: {}", self.id, e);
                self.publish(SettingsEvent::apply_failed(
                    &self.id,
                    &e.source_id,
                    &e.reason,
                ));
                Err(e)
            }
        }
    }

    /// 重置所有配置源, 不会失败
    pub fn reset(&mut self) {
        match self.sources_mut() {
            [single] => single.reset(),
            all => all.iter_mut().for_each(|source| source.reset()),
        }

        info!("设置页 {} 已重置", self.id);
        self.publish(SettingsEvent::reset(&self.id));
    }

    /// 显示名称
    pub fn label(&self) -> &str {
        match self.sources() {
            [single] => single.label(),
            _ => &self.display_name,
        }
    }

    /// 设置页自身没有帮助主题, 帮助主题由各配置源提供
    pub fn help_topic(&self) -> Option<&str> {
        None
    }

    /// 释放设置页
    ///
    /// 释放每个配置源并丢弃配置源序列, 之后设置页表现为空的组合。
    pub fn dispose(&mut self) {
        if let Some(mut sources) = self.sources.take() {
            for source in &mut sources {
                source.dispose();
            }
            info!("设置页 {} 已释放 {} 个配置源", self.id, sources.len());
            self.publish(SettingsEvent::disposed(&self.id));
        }
    }

    /// 是否已释放
    pub fn is_disposed(&self) -> bool {
        self.sources.is_none()
    }
}

/// 组合设置页构建器
///
/// 可选配置源在构建时解析: 不可用时直接跳过, 不会导致构建失败。
pub struct CompositeConfigurableBuilder {
    id: String,
    display_name: String,
    sources: Vec<Box<dyn ConfigSource>>,
    listeners: Vec<Arc<dyn SettingsEventListener>>,
}

impl CompositeConfigurableBuilder {
    /// 创建新的构建器, 默认使用 Go 设置页的标识和显示名称
    pub fn new() -> Self {
        Self {
            id: GO_CONFIGURABLE_ID.to_string(),
            display_name: GO_DISPLAY_NAME.to_string(),
            sources: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// 设置标识
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// 设置多配置源时的显示名称
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// 追加配置源
    pub fn source(mut self, source: Box<dyn ConfigSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// 追加可选配置源, `None` 时跳过
    pub fn optional_source(self, source: Option<Box<dyn ConfigSource>>) -> Self {
        match source {
            Some(source) => self.source(source),
            None => {
                debug!("可选配置源不可用, 已跳过");
                self
            }
        }
    }

    /// 注册事件监听器
    pub fn listener(mut self, listener: Arc<dyn SettingsEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// 构建组合设置页
    pub fn build(self) -> CompositeConfigurable {
        let mut configurable = CompositeConfigurable::new(self.id, self.display_name, self.sources);
        for listener in self.listeners {
            configurable.add_listener(listener);
        }
        debug!("组合设置页构建完成: {:?}", configurable);
        configurable
    }
}

impl Default for CompositeConfigurableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
