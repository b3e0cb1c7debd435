use crate::aws::AwsTranslator;
use crate::error::TranslateError;
use crate::mock::MockTranslator;
use crate::service::TranslationService;
use clap::ValueEnum;
use std::fmt;
use transync_toml::TransyncConfig;

/// The providers `transync` can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Amazon Translate.
    Aws,
    /// Offline provider appending `_<target>` to every value.
    Mock,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Aws, ProviderKind::Mock];

    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Aws => "aws",
            ProviderKind::Mock => "mock",
        }
    }

    /// Whether `config` holds what the provider needs.
    pub fn is_configured(self, config: &TransyncConfig) -> bool {
        match self {
            ProviderKind::Aws => config.aws().has_credentials(),
            ProviderKind::Mock => true,
        }
    }

    /// Mock providers are never picked without being asked for.
    pub fn is_offline(self) -> bool {
        matches!(self, ProviderKind::Mock)
    }

    /// Every provider usable with `config`.
    pub fn available(config: &TransyncConfig) -> Vec<ProviderKind> {
        Self::ALL
            .into_iter()
            .filter(|kind| kind.is_configured(config))
            .collect()
    }

    /// The first configured online provider.
    pub fn default_for(config: &TransyncConfig) -> Option<ProviderKind> {
        Self::available(config)
            .into_iter()
            .find(|kind| !kind.is_offline())
    }

    pub fn build(self, config: &TransyncConfig) -> Result<Box<dyn TranslationService>, TranslateError> {
        match self {
            ProviderKind::Aws => Ok(Box::new(AwsTranslator::new(&config.aws())?)),
            ProviderKind::Mock => Ok(Box::new(MockTranslator::default())),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use transync_toml::{AWS_KEY_ENV, AWS_SECRET_ENV, AwsSettings};

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset([AWS_KEY_ENV, AWS_SECRET_ENV], f)
    }

    #[test]
    #[serial(env)]
    fn test_only_mock_without_credentials() {
        without_env(|| {
            let config = TransyncConfig::default();
            assert_eq!(ProviderKind::available(&config), vec![ProviderKind::Mock]);
            assert_eq!(ProviderKind::default_for(&config), None);
            assert!(matches!(
                ProviderKind::Aws.build(&config),
                Err(TranslateError::NotConfigured { .. })
            ));
        });
    }

    #[test]
    #[serial(env)]
    fn test_aws_from_config() {
        without_env(|| {
            let mut config = TransyncConfig::default();
            config.provider.aws = Some(AwsSettings {
                key: Some("AKIA".to_string()),
                secret: Some("secret".to_string()),
                region: None,
            });

            assert_eq!(
                ProviderKind::available(&config),
                vec![ProviderKind::Aws, ProviderKind::Mock]
            );
            assert_eq!(ProviderKind::default_for(&config), Some(ProviderKind::Aws));
        });
    }

    #[test]
    #[serial(env)]
    fn test_aws_from_env() {
        temp_env::with_vars(
            [(AWS_KEY_ENV, Some("AKIA")), (AWS_SECRET_ENV, Some("secret"))],
            || {
                assert!(ProviderKind::Aws.is_configured(&TransyncConfig::default()));
            },
        );
    }

    #[test]
    fn test_build_mock() {
        let service = ProviderKind::Mock.build(&TransyncConfig::default()).unwrap();
        assert_eq!(service.name(), "mock");
        assert_eq!(ProviderKind::Mock.to_string(), "mock");
    }
}
