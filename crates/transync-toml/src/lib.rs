#![doc = include_str!("../README.md")]

use fs_err as fs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unic_langid::{LanguageIdentifier, LanguageIdentifierError};

/// File name looked up in the project root when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "transync.toml";

/// Environment variables that override the `[provider.aws]` table.
pub const AWS_KEY_ENV: &str = "TRANSYNC_AWS_KEY";
pub const AWS_SECRET_ENV: &str = "TRANSYNC_AWS_SECRET";
pub const AWS_REGION_ENV: &str = "TRANSYNC_AWS_REGION";

const DEFAULT_AWS_REGION: &str = "eu-west-1";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The default locale is not a valid language identifier.
    #[error("Invalid default locale '{name}'")]
    InvalidLocale {
        /// The invalid identifier.
        name: String,
        /// The parsing error produced by `unic-langid`.
        #[source]
        source: LanguageIdentifierError,
    },
    /// A namespace identifier cannot be expressed in a flat key.
    #[error("Invalid namespace '{name}': {reason}")]
    InvalidNamespace {
        /// The offending namespace identifier.
        name: String,
        /// Explanation of why it is rejected.
        reason: String,
    },
}

/// The configuration for `transync`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransyncConfig {
    /// Locale the other locales are translated from (e.g., "en").
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Directory of the default namespace, relative to the project root.
    /// Expected structure: {lang_dir}/{locale}/{file}.php
    #[serde(default = "default_lang_dir")]
    pub lang_dir: PathBuf,
    /// Cell delimiter used for CSV export and import.
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: String,
    /// Additional namespaces, mapped to their translation directories.
    ///
    /// ```toml
    /// [namespaces]
    /// courier = "vendor/courier/lang"
    /// ```
    #[serde(default)]
    pub namespaces: IndexMap<String, PathBuf>,
    /// Machine translation provider settings.
    #[serde(default)]
    pub provider: ProviderSettings,
}

/// The `[provider]` table.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Settings for Amazon Translate.
    #[serde(default)]
    pub aws: Option<AwsSettings>,
}

/// The `[provider.aws]` table.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AwsSettings {
    /// Access key id.
    pub key: Option<String>,
    /// Secret access key.
    pub secret: Option<String>,
    /// Region of the Translate endpoint.
    pub region: Option<String>,
}

impl AwsSettings {
    /// Returns the configured region, or the default one.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_AWS_REGION)
    }

    /// Returns `true` when both credentials are present and non-empty.
    pub fn has_credentials(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
        present(&self.key) && present(&self.secret)
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_lang_dir() -> PathBuf {
    PathBuf::from("lang")
}

fn default_csv_delimiter() -> String {
    ";".to_string()
}

impl Default for TransyncConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            lang_dir: default_lang_dir(),
            csv_delimiter: default_csv_delimiter(),
            namespaces: IndexMap::new(),
            provider: ProviderSettings::default(),
        }
    }
}

impl TransyncConfig {
    /// Reads and validates the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;

        let config: TransyncConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Loads the configuration for a project.
    ///
    /// An explicit path must exist. Without one, `transync.toml` in the
    /// project root is read when present and defaults are used otherwise.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::read_from_path(path);
        }

        let candidate = project_root.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            Self::read_from_path(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks the default locale and the namespace identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.default_locale_identifier()?;

        for name in self.namespaces.keys() {
            validate_namespace(name)?;
        }

        Ok(())
    }

    /// Returns the default locale as a `LanguageIdentifier`.
    pub fn default_locale_identifier(&self) -> Result<LanguageIdentifier, ConfigError> {
        self.default_locale
            .parse::<LanguageIdentifier>()
            .map_err(|source| ConfigError::InvalidLocale {
                name: self.default_locale.clone(),
                source,
            })
    }

    /// Resolves every namespace to its directory, relative to `project_root`.
    ///
    /// The default namespace `""` comes first and maps to `lang_dir`.
    pub fn namespace_dirs(&self, project_root: &Path) -> IndexMap<String, PathBuf> {
        let mut dirs = IndexMap::with_capacity(self.namespaces.len() + 1);
        dirs.insert(String::new(), project_root.join(&self.lang_dir));
        for (name, dir) in &self.namespaces {
            dirs.insert(name.clone(), project_root.join(dir));
        }
        dirs
    }

    /// Returns the AWS settings with environment overrides applied.
    pub fn aws(&self) -> AwsSettings {
        let mut settings = self.provider.aws.clone().unwrap_or_default();
        if let Ok(key) = env::var(AWS_KEY_ENV) {
            settings.key = Some(key);
        }
        if let Ok(secret) = env::var(AWS_SECRET_ENV) {
            settings.secret = Some(secret);
        }
        if let Ok(region) = env::var(AWS_REGION_ENV) {
            settings.region = Some(region);
        }
        settings
    }
}

/// Validates a namespace identifier from `[namespaces]`.
///
/// Namespaces become the `name::` prefix of flat keys, so they must be
/// non-empty, use `[a-z0-9:._]` only, and must not contain `::` themselves.
pub fn validate_namespace(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidNamespace {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("the empty namespace is reserved for lang_dir"));
    }
    if name.contains("::") {
        return Err(invalid("'::' separates the namespace from the file key"));
    }
    if name.starts_with(':') || name.ends_with(':') {
        return Err(invalid("a namespace may not start or end with ':'"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ':' | '.' | '_'))
    {
        return Err(invalid("only lowercase letters, digits, ':', '.' and '_' are allowed"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_from_path_success() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        let config_content = r#"
default_locale = "de"
lang_dir = "resources/lang"
csv_delimiter = ","

[namespaces]
courier = "vendor/courier/lang"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = TransyncConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.default_locale, "de");
        assert_eq!(config.lang_dir, PathBuf::from("resources/lang"));
        assert_eq!(config.csv_delimiter, ",");
        assert_eq!(
            config.namespaces.get("courier"),
            Some(&PathBuf::from("vendor/courier/lang"))
        );
    }

    #[test]
    fn test_read_from_path_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "").unwrap();

        let config = TransyncConfig::read_from_path(&config_path).unwrap();
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.lang_dir, PathBuf::from("lang"));
        assert_eq!(config.csv_delimiter, ";");
        assert!(config.namespaces.is_empty());
        assert!(config.provider.aws.is_none());
    }

    #[test]
    fn test_read_from_path_file_not_found() {
        let non_existent_path = Path::new("/non/existent/path/transync.toml");
        let result = TransyncConfig::read_from_path(non_existent_path);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_read_from_path_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, "default_locale = [\"en\"]\n").unwrap();

        let result = TransyncConfig::read_from_path(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_read_from_path_invalid_locale() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, "default_locale = \"not a locale!\"\n").unwrap();

        let result = TransyncConfig::read_from_path(&config_path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidLocale { name, .. }) if name == "not a locale!"
        ));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = TransyncConfig::load(temp_dir.path(), None).unwrap();
        assert_eq!(config.default_locale, "en");
    }

    #[test]
    fn test_load_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("custom.toml");
        let result = TransyncConfig::load(temp_dir.path(), Some(&missing));
        assert!(matches!(result, Err(ConfigError::NotFound(path)) if path == missing));
    }

    #[test]
    fn test_namespace_dirs_default_first() {
        let mut config = TransyncConfig::default();
        config
            .namespaces
            .insert("courier".to_string(), PathBuf::from("vendor/courier/lang"));

        let dirs = config.namespace_dirs(Path::new("/app"));
        let keys: Vec<&str> = dirs.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["", "courier"]);
        assert_eq!(dirs[""], PathBuf::from("/app/lang"));
        assert_eq!(dirs["courier"], PathBuf::from("/app/vendor/courier/lang"));
    }

    #[rstest]
    #[case("courier")]
    #[case("acme.billing")]
    #[case("vendor_1:pkg")]
    fn test_validate_namespace_accepts(#[case] name: &str) {
        assert!(validate_namespace(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("Courier")]
    #[case("a::b")]
    #[case("pkg:")]
    #[case(":pkg")]
    #[case("has space")]
    fn test_validate_namespace_rejects(#[case] name: &str) {
        assert!(matches!(
            validate_namespace(name),
            Err(ConfigError::InvalidNamespace { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_aws_settings_from_file() {
        temp_env::with_vars_unset([AWS_KEY_ENV, AWS_SECRET_ENV, AWS_REGION_ENV], || {
            let config: TransyncConfig = toml::from_str(
                "[provider.aws]\nkey = \"file-key\"\nsecret = \"file-secret\"\n",
            )
            .unwrap();

            let aws = config.aws();
            assert_eq!(aws.key.as_deref(), Some("file-key"));
            assert_eq!(aws.region(), "eu-west-1");
            assert!(aws.has_credentials());
        });
    }

    #[test]
    #[serial]
    fn test_aws_settings_env_overrides_file() {
        temp_env::with_vars(
            [
                (AWS_KEY_ENV, Some("env-key")),
                (AWS_SECRET_ENV, Some("env-secret")),
                (AWS_REGION_ENV, Some("us-east-1")),
            ],
            || {
                let config: TransyncConfig =
                    toml::from_str("[provider.aws]\nkey = \"file-key\"\n").unwrap();

                let aws = config.aws();
                assert_eq!(aws.key.as_deref(), Some("env-key"));
                assert_eq!(aws.secret.as_deref(), Some("env-secret"));
                assert_eq!(aws.region(), "us-east-1");
            },
        );
    }

    #[test]
    #[serial]
    fn test_aws_settings_missing_secret() {
        temp_env::with_vars_unset([AWS_KEY_ENV, AWS_SECRET_ENV, AWS_REGION_ENV], || {
            let config: TransyncConfig =
                toml::from_str("[provider.aws]\nkey = \"file-key\"\nsecret = \"  \"\n").unwrap();
            assert!(!config.aws().has_credentials());
        });
    }
}
