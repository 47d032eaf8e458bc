//! 配置源抽象接口

use settings_common::ValidationError;
use std::any::Any;

/// 配置源 trait
///
/// 一个可独立验证、应用和重置的配置单元。`is_modified` 通过比较编辑中的状态
/// 与最近一次应用的状态得出, 不允许有副作用。
pub trait ConfigSource: Send + Sync {
    /// 获取配置源标识
    fn id(&self) -> &str;

    /// 获取显示名称
    fn label(&self) -> &str;

    /// 是否存在未应用的修改
    fn is_modified(&self) -> bool;

    /// 只做校验, 不提交
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// 应用编辑中的配置
    ///
    /// 配置无效时返回 [`ValidationError`], 此时已应用的状态保持不变。
    fn apply(&mut self) -> Result<(), ValidationError>;

    /// 丢弃编辑, 重新载入最近一次应用的状态
    fn reset(&mut self);

    /// 获取帮助主题
    fn help_topic(&self) -> Option<&str> {
        None
    }

    /// 释放配置源持有的资源
    fn dispose(&mut self) {}

    /// 类型化访问
    fn as_any(&self) -> &dyn Any;

    /// 类型化可变访问
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl std::fmt::Debug for dyn ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("id", &self.id())
            .field("label", &self.label())
            .field("modified", &self.is_modified())
            .finish()
    }
}
