//! 构建目标 (Build Tags) 配置源

use crate::staged::{SharedSettings, StagedSource};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use settings_abstractions::{ConfigSource, ConfigSourceProvider, SettingsValidator};
use settings_common::ValidationError;

/// 构建目标配置源标识
pub const BUILD_TARGET_SOURCE_ID: &str = "go.build.target";

/// 构建目标配置源显示名称
pub const BUILD_TARGET_SOURCE_LABEL: &str = "Build Tags";

/// 构建目标配置源帮助主题
pub const BUILD_TARGET_HELP_TOPIC: &str = "go.settings.build.tags";

/// 表示沿用环境默认值
pub const DEFAULT: &str = "default";

/// 已知的 GOOS 取值
pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// 已知的 GOARCH 取值
pub const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "arm64", "arm64be", "armbe", "loong64", "mips", "mips64",
    "mips64le", "mips64p32", "mips64p32le", "mipsle", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

static GO_VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(go)?[1-9][0-9]*\.[0-9]+(\.[0-9]+)?$").expect("版本号正则无效")
});

/// 编译器
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    /// 沿用环境默认值
    #[default]
    Default,
    /// 官方 gc 编译器
    Gc,
    /// gccgo
    Gccgo,
    /// 不区分编译器
    Any,
}

/// 构建目标设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTargetSettings {
    /// 目标操作系统 (GOOS)
    pub os: String,
    /// 目标架构 (GOARCH)
    pub arch: String,
    /// Go 版本
    pub go_version: String,
    /// 编译器
    pub compiler: Compiler,
    /// 自定义构建标签
    pub custom_flags: Vec<String>,
}

impl Default for BuildTargetSettings {
    fn default() -> Self {
        Self {
            os: DEFAULT.to_string(),
            arch: DEFAULT.to_string(),
            go_version: DEFAULT.to_string(),
            compiler: Compiler::Default,
            custom_flags: Vec::new(),
        }
    }
}

/// 构建目标验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildTargetValidator;

impl SettingsValidator<BuildTargetSettings> for BuildTargetValidator {
    fn validate(&self, source_id: &str, settings: &BuildTargetSettings) -> Result<(), ValidationError> {
        check_known(source_id, "os", &settings.os, KNOWN_OS)?;
        check_known(source_id, "arch", &settings.arch, KNOWN_ARCH)?;

        if settings.go_version != DEFAULT && !GO_VERSION_PATTERN.is_match(&settings.go_version) {
            return Err(ValidationError::invalid_field_value(
                source_id,
                "go_version",
                &settings.go_version,
                "期望格式: go1.21 或 1.21.3",
            ));
        }

        for flag in &settings.custom_flags {
            if flag.is_empty() {
                return Err(ValidationError::new(source_id, "构建标签不能为空").with_field("custom_flags"));
            }
            if flag.chars().any(char::is_whitespace) {
                return Err(ValidationError::invalid_field_value(
                    source_id,
                    "custom_flags",
                    flag,
                    "构建标签不能包含空白字符",
                ));
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "BuildTargetValidator"
    }
}

fn check_known(source_id: &str, field: &str, value: &str, known: &[&str]) -> Result<(), ValidationError> {
    if value == DEFAULT || known.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::invalid_field_value(
            source_id,
            field,
            value,
            format!("必须是 {} 或已知取值之一", DEFAULT),
        ))
    }
}

/// 创建构建目标配置源
pub fn build_target_source(
    applied: SharedSettings<BuildTargetSettings>,
) -> StagedSource<BuildTargetSettings> {
    StagedSource::new(BUILD_TARGET_SOURCE_ID, BUILD_TARGET_SOURCE_LABEL, applied)
        .with_validator(BuildTargetValidator)
        .with_help_topic(BUILD_TARGET_HELP_TOPIC)
}

/// 构建目标配置源提供者
#[derive(Debug, Clone)]
pub struct BuildTargetProvider {
    settings: SharedSettings<BuildTargetSettings>,
}

impl BuildTargetProvider {
    /// 创建新的构建目标配置源提供者
    pub fn new(settings: SharedSettings<BuildTargetSettings>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ConfigSourceProvider for BuildTargetProvider {
    async fn create_source(&self) -> Option<Box<dyn ConfigSource>> {
        Some(Box::new(build_target_source(self.settings.clone())))
    }

    fn name(&self) -> &str {
        "BuildTargetProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(settings: &BuildTargetSettings) -> Result<(), ValidationError> {
        BuildTargetValidator.validate(BUILD_TARGET_SOURCE_ID, settings)
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&BuildTargetSettings::default()).is_ok());
    }

    #[test]
    fn test_known_platform_is_valid() {
        let settings = BuildTargetSettings {
            os: "linux".to_string(),
            arch: "arm64".to_string(),
            go_version: "go1.21".to_string(),
            compiler: Compiler::Gc,
            custom_flags: vec!["integration".to_string(), "netgo".to_string()],
        };
        assert!(validate(&settings).is_ok());
    }

    #[test]
    fn test_unknown_os_is_rejected() {
        let settings = BuildTargetSettings {
            os: "beos".to_string(),
            ..BuildTargetSettings::default()
        };
        let error = validate(&settings).unwrap_err();
        assert_eq!(error.field.as_deref(), Some("os"));
        assert_eq!(error.source_id, BUILD_TARGET_SOURCE_ID);
    }

    #[test]
    fn test_go_version_format() {
        for version in ["1.21", "go1.21.3", "1.9"] {
            let settings = BuildTargetSettings {
                go_version: version.to_string(),
                ..BuildTargetSettings::default()
            };
            assert!(validate(&settings).is_ok(), "{} 应该有效", version);
        }

        let settings = BuildTargetSettings {
            go_version: "latest".to_string(),
            ..BuildTargetSettings::default()
        };
        assert_eq!(validate(&settings).unwrap_err().field.as_deref(), Some("go_version"));
    }

    #[test]
    fn test_flags_with_whitespace_are_rejected() {
        let settings = BuildTargetSettings {
            custom_flags: vec!["foo bar".to_string()],
            ..BuildTargetSettings::default()
        };
        assert_eq!(validate(&settings).unwrap_err().field.as_deref(), Some("custom_flags"));

        let settings = BuildTargetSettings {
            custom_flags: vec![String::new()],
            ..BuildTargetSettings::default()
        };
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn test_compiler_serializes_lowercase() {
        let json = serde_json::to_string(&Compiler::Gccgo).unwrap();
        assert_eq!(json, "\"gccgo\"");
    }
}
