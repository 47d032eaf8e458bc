//! # Settings Abstractions
//!
//! 设置页抽象层，定义配置源及其组合的核心接口和约定。
//!
//! ## 核心接口
//!
//! - [`ConfigSource`] - 可独立验证/应用/重置的配置单元
//! - [`ConfigSourceProvider`] - 配置源提供者接口
//! - [`SettingsValidator`] - 设置值验证接口
//! - [`SettingsEventListener`] - 设置事件监听接口

pub mod events;
pub mod provider;
pub mod source;
pub mod validator;

pub use events::*;
pub use provider::*;
pub use source::*;
pub use validator::*;

pub use settings_common::ValidationError;
