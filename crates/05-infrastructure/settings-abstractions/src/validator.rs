//! 配置验证抽象接口

use settings_common::ValidationError;

/// 设置值验证器 trait
///
/// 对某个设置值类型做校验, `source_id` 用于在错误中标识配置源。
pub trait SettingsValidator<T>: Send + Sync {
    /// 验证配置
    fn validate(&self, source_id: &str, settings: &T) -> Result<(), ValidationError>;

    /// 获取验证器名称
    fn name(&self) -> &str;
}

/// 不做任何校验的验证器
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<T> SettingsValidator<T> for AcceptAll {
    fn validate(&self, _source_id: &str, _settings: &T) -> Result<(), ValidationError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "AcceptAll"
    }
}

/// 基于闭包的验证器
pub struct FnValidator<F> {
    name: String,
    check: F,
}

impl<F> FnValidator<F> {
    /// 创建新的闭包验证器
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<T, F> SettingsValidator<T> for FnValidator<F>
where
    F: Fn(&str, &T) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, source_id: &str, settings: &T) -> Result<(), ValidationError> {
        (self.check)(source_id, settings)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_validator_reports_source_id() {
        let validator = FnValidator::new("non_empty", |source_id: &str, value: &String| {
            if value.is_empty() {
                Err(ValidationError::required_field_missing(source_id, "value"))
            } else {
                Ok(())
            }
        });

        assert!(validator.validate("demo", &"x".to_string()).is_ok());
        let error = validator.validate("demo", &String::new()).unwrap_err();
        assert_eq!(error.source_id, "demo");
        assert_eq!(SettingsValidator::<String>::name(&validator), "non_empty");
    }

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.validate("demo", &42_u32).is_ok());
    }
}
