//! 配置源提供者抽象接口

use crate::source::ConfigSource;
use async_trait::async_trait;

/// 配置源提供者 trait
///
/// 由外部服务 (SDK 服务、构建目标设置、库路径设置) 实现, 负责创建配置源。
/// 返回 `None` 表示该配置源当前不可用, 组合方应跳过它而不是失败。
#[async_trait]
pub trait ConfigSourceProvider: Send + Sync {
    /// 创建配置源
    async fn create_source(&self) -> Option<Box<dyn ConfigSource>>;

    /// 获取提供者名称
    fn name(&self) -> &str;
}
