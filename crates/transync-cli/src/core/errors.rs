//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use transync_core::StoreError;
use transync_core::csv_io::CsvError;
use transync_toml::ConfigError;
use transync_translate::TranslateError;

/// Error when `transync.toml` cannot be loaded.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load the transync configuration")]
#[diagnostic(
    code(transync::config::invalid),
    help(
        "transync.toml is optional; when present it looks like:\n\n  \
          default_locale = \"en\"\n  \
          lang_dir = \"lang\"\n"
    )
)]
pub struct ConfigLoadError {
    #[source]
    pub source: ConfigError,
}

/// Error when a language identifier is invalid.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid locale: {identifier}")]
#[diagnostic(
    code(transync::locale::invalid),
    help("Use a language tag such as 'de', 'pt' or 'zh-TW'")
)]
pub struct InvalidLocaleError {
    /// The invalid locale.
    pub identifier: String,
}

/// Error when a namespace is not registered.
#[derive(Debug, Diagnostic, Error)]
#[error("namespace '{namespace}' is not registered")]
#[diagnostic(
    code(transync::namespace::unknown),
    help("Registered namespaces: {available}")
)]
pub struct UnknownNamespaceError {
    pub namespace: String,
    /// Comma-separated list of registered namespaces.
    pub available: String,
}

/// Error when the CSV delimiter is not a single character.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid separator '{separator}'")]
#[diagnostic(
    code(transync::csv::separator),
    help("Use a single ASCII character such as ';' or ',', or '\\t' for tabs")
)]
pub struct InvalidSeparatorError {
    pub separator: String,
}

/// Error when the file given to `import` does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("import file not found: {}", path.display())]
#[diagnostic(
    code(transync::import::not_found),
    help("Create it with `transync export --locale <LOCALE>`")
)]
pub struct ImportFileNotFoundError {
    pub path: PathBuf,
}

/// Error when an import file is not an export of `transync`.
#[derive(Debug, Diagnostic, Error)]
#[error("cannot import {}", path.display())]
#[diagnostic(code(transync::import::format))]
pub struct CsvFormatError {
    pub path: PathBuf,

    #[source]
    pub source: CsvError,

    #[help]
    pub help: Option<String>,
}

/// Error when no provider is configured and none was requested.
#[derive(Debug, Diagnostic, Error)]
#[error("no machine translation provider is configured")]
#[diagnostic(
    code(transync::provider::none),
    help(
        "Add credentials under [provider.aws] in transync.toml, set TRANSYNC_AWS_KEY and \
         TRANSYNC_AWS_SECRET, or try the workflow offline with --provider mock"
    )
)]
pub struct NoProviderError;

/// Error when the requested provider lacks its settings.
#[derive(Debug, Diagnostic, Error)]
#[error("provider '{provider}' is not configured")]
#[diagnostic(
    code(transync::provider::not_configured),
    help("Configured providers: {available}")
)]
pub struct ProviderNotConfiguredError {
    pub provider: String,
    /// Comma-separated list of configured providers.
    pub available: String,
}

/// Error when a provider cannot translate from or into a locale.
#[derive(Debug, Diagnostic, Error)]
#[error("provider '{provider}' does not support locale '{locale}'")]
#[diagnostic(
    code(transync::provider::unsupported_locale),
    help("Supported locales: {supported}")
)]
pub struct UnsupportedLocaleError {
    pub provider: String,
    pub locale: String,
    /// Comma-separated list of supported locales.
    pub supported: String,
}

/// A translation file that could not be written.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to write {target}")]
#[diagnostic(code(transync::write::failed))]
pub struct WriteFailure {
    /// `locale/[namespace::]file` of the failing group.
    pub target: String,

    #[help]
    pub help: String,
}

/// Report for write failures.
#[derive(Debug, Diagnostic, Error)]
#[error("wrote {written_count} file(s), {error_count} error(s)")]
#[diagnostic(code(transync::write::report))]
pub struct WriteReportError {
    /// Number of files written.
    pub written_count: usize,

    /// Number of files that failed.
    pub error_count: usize,

    #[related]
    pub errors: Vec<WriteFailure>,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigLoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidLocale(#[from] InvalidLocaleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnknownNamespace(#[from] UnknownNamespaceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidSeparator(#[from] InvalidSeparatorError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ImportFileNotFound(#[from] ImportFileNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CsvFormat(#[from] CsvFormatError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NoProvider(#[from] NoProviderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ProviderNotConfigured(#[from] ProviderNotConfiguredError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    UnsupportedLocale(#[from] UnsupportedLocaleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Write(#[from] WriteReportError),

    #[error("failed to read translation files")]
    #[diagnostic(
        code(transync::store),
        help("Fix or remove the file named below; nothing was written")
    )]
    Store(#[source] StoreError),

    #[error("machine translation failed")]
    #[diagnostic(code(transync::provider::failed))]
    Translate(#[from] TranslateError),

    #[error("CSV error: {0}")]
    #[diagnostic(code(transync::csv))]
    Csv(#[from] CsvError),

    #[error("IO error: {0}")]
    #[diagnostic(code(transync::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(transync::other))]
    Other(String),
}

impl From<ConfigError> for CliError {
    fn from(source: ConfigError) -> Self {
        CliError::Config(ConfigLoadError { source })
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        CliError::Store(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(format!("{err:#}"))
    }
}
