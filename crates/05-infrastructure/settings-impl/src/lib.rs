//! # Settings Implementation
//!
//! Go 设置页的具体实现。
//!
//! ## 主要组件
//!
//! - [`CompositeConfigurable`] - 组合设置页, 单配置源时透传
//! - [`StagedSource`] - 持有编辑副本和已应用值的配置源
//! - [`LocalSdkService`] - SDK 探测与 SDK 配置源
//! - [`BuildTargetProvider`] / [`LibrariesProvider`] - 构建目标与库路径配置源
//! - [`GoConfigurableProvider`] - 组装 Go 设置页
//! - [`GoSettingsOptions`] - 选项加载

pub mod build_target;
pub mod composite;
pub mod libraries;
pub mod options;
pub mod provider;
pub mod sdk;
pub mod staged;

pub use build_target::*;
pub use composite::*;
pub use libraries::*;
pub use options::*;
pub use provider::*;
pub use sdk::*;
pub use staged::*;

#[cfg(test)]
mod tests;
