//! 错误类型定义

use thiserror::Error;

/// 配置源验证错误
///
/// 由配置源的 `apply` / `validate` 产生，聚合器原样向上传播。
/// `source_id` 标识出错的配置源。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("配置源 {source_id} 验证失败{}: {reason}", field_suffix(.field))]
pub struct ValidationError {
    /// 出错的配置源标识
    pub source_id: String,
    /// 出错的字段
    pub field: Option<String>,
    /// 失败原因
    pub reason: String,
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|f| format!(" [{}]", f))
        .unwrap_or_default()
}

impl ValidationError {
    /// 创建新的验证错误
    pub fn new(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            field: None,
            reason: reason.into(),
        }
    }

    /// 创建必需字段缺失错误
    pub fn required_field_missing(
        source_id: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        let field_name = field_name.into();
        Self {
            source_id: source_id.into(),
            reason: format!("必需字段缺失: {}", field_name),
            field: Some(field_name),
        }
    }

    /// 创建字段值无效错误
    pub fn invalid_field_value(
        source_id: impl Into<String>,
        field_name: impl Into<String>,
        value: impl AsRef<str>,
        reason: impl AsRef<str>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            field: Some(field_name.into()),
            reason: format!("值 {:?} 无效, 原因: {}", value.as_ref(), reason.as_ref()),
        }
    }

    /// 指定出错字段
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// 设置页基础设施错误
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("设置选项加载失败: {source}")]
    OptionsLoadError {
        #[from]
        source: config::ConfigError,
    },

    #[error("设置验证失败: {source}")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("日志初始化失败: {message}")]
    LoggingInitFailed { message: String },
}

/// 配置源验证结果
pub type ValidationResult<T> = Result<T, ValidationError>;

/// 基础设施操作结果
pub type SettingsResult<T> = Result<T, SettingsError>;
