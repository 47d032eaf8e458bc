//! 设置变更事件定义

use serde::Serialize;
use std::collections::HashMap;

/// 设置事件
#[derive(Debug, Clone, Serialize)]
pub struct SettingsEvent {
    /// 事件ID
    pub id: uuid::Uuid,
    /// 事件类型
    pub event_type: SettingsEventType,
    /// 所属设置页标识
    pub configurable_id: String,
    /// 相关配置源标识
    pub source_id: Option<String>,
    /// 事件时间
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// 额外元数据
    pub metadata: HashMap<String, String>,
}

impl SettingsEvent {
    fn new(event_type: SettingsEventType, configurable_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            event_type,
            configurable_id: configurable_id.into(),
            source_id: None,
            timestamp: chrono::Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// 创建应用成功事件
    pub fn applied(configurable_id: impl Into<String>) -> Self {
        Self::new(SettingsEventType::Applied, configurable_id)
    }

    /// 创建应用失败事件
    pub fn apply_failed(
        configurable_id: impl Into<String>,
        source_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let mut event = Self::new(SettingsEventType::ApplyFailed, configurable_id);
        event.source_id = Some(source_id.into());
        event.with_metadata("reason", reason)
    }

    /// 创建重置事件
    pub fn reset(configurable_id: impl Into<String>) -> Self {
        Self::new(SettingsEventType::Reset, configurable_id)
    }

    /// 创建释放事件
    pub fn disposed(configurable_id: impl Into<String>) -> Self {
        Self::new(SettingsEventType::Disposed, configurable_id)
    }

    /// 添加元数据
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// 设置事件类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum SettingsEventType {
    /// 全部配置源应用成功
    Applied,
    /// 某个配置源应用失败
    ApplyFailed,
    /// 编辑状态已重置
    Reset,
    /// 设置页已释放
    Disposed,
}

/// 设置事件监听器 trait
pub trait SettingsEventListener: Send + Sync {
    /// 处理设置事件
    fn on_settings_event(&self, event: &SettingsEvent);

    /// 获取监听器名称
    fn name(&self) -> &str;

    /// 获取感兴趣的事件类型, 为空表示全部
    fn interested_event_types(&self) -> Vec<SettingsEventType> {
        Vec::new()
    }
}

/// 判断监听器是否关心某个事件
pub fn is_interested(listener: &dyn SettingsEventListener, event: &SettingsEvent) -> bool {
    let interested = listener.interested_event_types();
    interested.is_empty() || interested.contains(&event.event_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailuresOnly;

    impl SettingsEventListener for FailuresOnly {
        fn on_settings_event(&self, _event: &SettingsEvent) {}

        fn name(&self) -> &str {
            "failures-only"
        }

        fn interested_event_types(&self) -> Vec<SettingsEventType> {
            vec![SettingsEventType::ApplyFailed]
        }
    }

    #[test]
    fn test_apply_failed_event_carries_source() {
        let event = SettingsEvent::apply_failed("go", "go.sdk", "SDK 目录不存在");
        assert_eq!(event.event_type, SettingsEventType::ApplyFailed);
        assert_eq!(event.source_id.as_deref(), Some("go.sdk"));
        assert_eq!(event.metadata.get("reason").map(String::as_str), Some("SDK 目录不存在"));

        let json = event.to_json();
        assert_eq!(json["configurable_id"], "go");
        assert_eq!(json["event_type"], "ApplyFailed");
    }

    #[test]
    fn test_listener_interest_filter() {
        let listener = FailuresOnly;
        assert!(is_interested(&listener, &SettingsEvent::apply_failed("go", "a", "b")));
        assert!(!is_interested(&listener, &SettingsEvent::applied("go")));
    }
}
