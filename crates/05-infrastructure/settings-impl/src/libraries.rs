//! 库路径配置源

use crate::staged::{SharedSettings, StagedSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use settings_abstractions::{ConfigSource, ConfigSourceProvider, SettingsValidator};
use settings_common::ValidationError;
use std::collections::HashSet;
use std::path::PathBuf;

/// 库路径配置源标识
pub const LIBRARIES_SOURCE_ID: &str = "go.libraries";

/// 库路径配置源显示名称
pub const LIBRARIES_SOURCE_LABEL: &str = "Go Libraries";

/// 库路径配置源帮助主题
pub const LIBRARIES_HELP_TOPIC: &str = "go.settings.libraries";

/// 库路径设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrariesSettings {
    /// 额外的库根目录
    pub paths: Vec<PathBuf>,
    /// 是否使用 GOPATH 中的库
    pub use_gopath_libraries: bool,
}

impl Default for LibrariesSettings {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            use_gopath_libraries: true,
        }
    }
}

/// 库路径验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct LibrariesValidator;

impl SettingsValidator<LibrariesSettings> for LibrariesValidator {
    fn validate(&self, source_id: &str, settings: &LibrariesSettings) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();

        for path in &settings.paths {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::new(source_id, "库路径不能为空").with_field("paths"));
            }
            if !path.is_absolute() {
                return Err(ValidationError::invalid_field_value(
                    source_id,
                    "paths",
                    path.display().to_string(),
                    "必须是绝对路径",
                ));
            }
            if !seen.insert(path) {
                return Err(ValidationError::invalid_field_value(
                    source_id,
                    "paths",
                    path.display().to_string(),
                    "重复的库路径",
                ));
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "LibrariesValidator"
    }
}

/// 创建库路径配置源
pub fn libraries_source(applied: SharedSettings<LibrariesSettings>) -> StagedSource<LibrariesSettings> {
    StagedSource::new(LIBRARIES_SOURCE_ID, LIBRARIES_SOURCE_LABEL, applied)
        .with_validator(LibrariesValidator)
        .with_help_topic(LIBRARIES_HELP_TOPIC)
}

/// 库路径配置源提供者
#[derive(Debug, Clone)]
pub struct LibrariesProvider {
    settings: SharedSettings<LibrariesSettings>,
}

impl LibrariesProvider {
    /// 创建新的库路径配置源提供者
    pub fn new(settings: SharedSettings<LibrariesSettings>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ConfigSourceProvider for LibrariesProvider {
    async fn create_source(&self) -> Option<Box<dyn ConfigSource>> {
        Some(Box::new(libraries_source(self.settings.clone())))
    }

    fn name(&self) -> &str {
        "LibrariesProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_absolute_unique_paths_are_valid() {
        let settings = LibrariesSettings {
            paths: vec![absolute("libs-a"), absolute("libs-b")],
            use_gopath_libraries: false,
        };
        assert!(LibrariesValidator.validate(LIBRARIES_SOURCE_ID, &settings).is_ok());
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let settings = LibrariesSettings {
            paths: vec![PathBuf::from("vendor/libs")],
            ..LibrariesSettings::default()
        };
        let error = LibrariesValidator.validate(LIBRARIES_SOURCE_ID, &settings).unwrap_err();
        assert_eq!(error.field.as_deref(), Some("paths"));
    }

    #[test]
    fn test_duplicate_path_is_rejected() {
        let settings = LibrariesSettings {
            paths: vec![absolute("libs-a"), absolute("libs-a")],
            ..LibrariesSettings::default()
        };
        let error = LibrariesValidator.validate(LIBRARIES_SOURCE_ID, &settings).unwrap_err();
        assert!(error.reason.contains("重复"));
    }
}
