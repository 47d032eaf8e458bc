//! 暂存式配置源实现

use parking_lot::RwLock;
use settings_abstractions::{AcceptAll, ConfigSource, SettingsValidator};
use settings_common::ValidationError;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 共享的已应用设置
///
/// 代表外部设置存储中最近一次应用的值。宿主与配置源持有同一个句柄。
#[derive(Debug, Default)]
pub struct SharedSettings<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for SharedSettings<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> SharedSettings<T> {
    /// 创建新的共享设置
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// 获取当前已应用值的快照
    pub fn snapshot(&self) -> T {
        self.inner.read().clone()
    }

    /// 以只读方式访问已应用值
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.read())
    }

    /// 替换已应用值
    pub fn store(&self, value: T) {
        *self.inner.write() = value;
    }
}

/// 暂存式配置源
///
/// 持有一份编辑中的副本和指向已应用值的共享句柄:
/// - `is_modified` 比较两者
/// - `apply` 先校验, 通过后把编辑副本写回共享句柄
/// - `reset` 用共享句柄中的值覆盖编辑副本
pub struct StagedSource<T> {
    id: String,
    label: String,
    help_topic: Option<String>,
    edited: T,
    applied: SharedSettings<T>,
    validator: Box<dyn SettingsValidator<T>>,
    disposed: bool,
}

impl<T> std::fmt::Debug for StagedSource<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedSource")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("edited", &self.edited)
            .field("validator", &self.validator.name())
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl<T> StagedSource<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// 创建新的暂存式配置源, 编辑副本初始化为当前已应用值
    pub fn new(id: impl Into<String>, label: impl Into<String>, applied: SharedSettings<T>) -> Self {
        let edited = applied.snapshot();
        Self {
            id: id.into(),
            label: label.into(),
            help_topic: None,
            edited,
            applied,
            validator: Box::new(AcceptAll),
            disposed: false,
        }
    }

    /// 设置验证器
    pub fn with_validator(mut self, validator: impl SettingsValidator<T> + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// 设置帮助主题
    pub fn with_help_topic(mut self, topic: impl Into<String>) -> Self {
        self.help_topic = Some(topic.into());
        self
    }

    /// 编辑中的值
    pub fn edited(&self) -> &T {
        &self.edited
    }

    /// 可变访问编辑中的值
    pub fn edit(&mut self) -> &mut T {
        &mut self.edited
    }

    /// 替换编辑中的值
    pub fn set_edited(&mut self, value: T) {
        self.edited = value;
    }

    /// 已应用值的句柄
    pub fn applied(&self) -> &SharedSettings<T> {
        &self.applied
    }

    /// 是否已释放
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<T> ConfigSource for StagedSource<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_modified(&self) -> bool {
        self.applied.with(|applied| *applied != self.edited)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.validator.validate(&self.id, &self.edited)
    }

    fn apply(&mut self) -> Result<(), ValidationError> {
        if let Err(e) = self.validate() {
            warn!("配置源 {} 校验未通过: {}", self.id, e);
            return Err(e);
        }

        self.applied.store(self.edited.clone());
        info!("配置源已应用: {}", self.id);
        Ok(())
    }

    fn reset(&mut self) {
        self.edited = self.applied.snapshot();
        debug!("配置源已重置: {}", self.id);
    }

    fn help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    fn dispose(&mut self) {
        self.disposed = true;
        debug!("配置源已释放: {}", self.id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
