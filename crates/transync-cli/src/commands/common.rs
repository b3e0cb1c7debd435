use crate::commands::DryRunDiff;
use crate::core::{
    CliError, InvalidLocaleError, InvalidSeparatorError, UnknownNamespaceError, WriteFailure,
    WriteReportError,
};
use crate::utils::ui;
use clap::Args;
use std::path::PathBuf;
use transync_core::csv_io::parse_delimiter;
use transync_core::{FileIndex, WriteReport};
use transync_toml::TransyncConfig;
use unic_langid::LanguageIdentifier;

/// Options shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectArgs {
    /// Path to the project root (defaults to current directory).
    #[arg(short, long, global = true)]
    pub path: Option<PathBuf>,

    /// Configuration file (defaults to transync.toml in the project root).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Locale the other locales are translated from (overrides the configuration).
    #[arg(long, global = true)]
    pub default_locale: Option<String>,

    /// Deterministic output for end-to-end tests.
    #[arg(long, global = true, hide = true)]
    pub e2e: bool,
}

/// A project resolved from [`ProjectArgs`]: its configuration and translation files.
#[derive(Debug)]
pub struct Project {
    pub config: TransyncConfig,
    pub default_locale: String,
    pub index: FileIndex,
}

impl Project {
    pub fn open(args: &ProjectArgs) -> Result<Self, CliError> {
        let root = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
        let config = TransyncConfig::load(&root, args.config.as_deref())?;

        let default_locale = match &args.default_locale {
            Some(locale) => parse_locale(locale)?,
            None => config.default_locale.clone(),
        };

        let namespaces = config.namespace_dirs(&root);
        tracing::debug!(root = %root.display(), namespaces = namespaces.len(), %default_locale, "opened project");

        Ok(Self {
            default_locale,
            index: FileIndex::new(namespaces),
            config,
        })
    }

    /// The CSV delimiter: `separator` when given, the configured one otherwise.
    pub fn delimiter(&self, separator: Option<&str>) -> Result<u8, CliError> {
        let raw = separator.unwrap_or(&self.config.csv_delimiter);
        parse_delimiter(raw).map_err(|_| {
            InvalidSeparatorError {
                separator: raw.to_string(),
            }
            .into()
        })
    }

    /// Fails when `namespace` is given but not registered.
    pub fn check_namespace(&self, namespace: Option<&str>) -> Result<(), CliError> {
        let Some(namespace) = namespace else {
            return Ok(());
        };
        let registry = self.index.registry();
        if registry.contains_key(namespace) {
            return Ok(());
        }

        let available = registry
            .keys()
            .map(|ns| if ns.is_empty() { "\"\" (default)" } else { ns.as_str() })
            .collect::<Vec<_>>()
            .join(", ");
        Err(UnknownNamespaceError {
            namespace: namespace.to_string(),
            available,
        }
        .into())
    }
}

/// Checks that `locale` is a language identifier.
pub fn parse_locale(locale: &str) -> Result<String, CliError> {
    locale
        .parse::<LanguageIdentifier>()
        .map_err(|_| InvalidLocaleError {
            identifier: locale.to_string(),
        })?;
    Ok(locale.to_string())
}

/// Prints what the writer did and turns failed files into an error.
pub fn render_write_report(report: &WriteReport, dry_run: bool) -> Result<(), CliError> {
    for error in &report.skipped {
        ui::print_skipped_key(error);
    }

    let mut files = 0;
    let mut values = 0;
    for file in &report.written {
        if !file.changed() {
            ui::print_unchanged(&file.path);
            continue;
        }

        files += 1;
        values += file.values;
        if dry_run {
            ui::print_would_write(&file.path, file.values, file.created());
            DryRunDiff::of(file).print();
        } else {
            ui::print_written(&file.path, file.values, file.created());
        }
    }

    if dry_run {
        ui::print_dry_run_summary(files, values);
    } else {
        ui::print_write_summary(files, values);
    }

    if report.is_success() {
        return Ok(());
    }

    let errors = report
        .failed
        .iter()
        .map(|failure| {
            let file = if failure.namespace.is_empty() {
                failure.file.clone()
            } else {
                format!("{}::{}", failure.namespace, failure.file)
            };
            WriteFailure {
                target: format!("{}/{}", failure.locale, file),
                help: failure.error.to_string(),
            }
        })
        .collect::<Vec<_>>();

    Err(WriteReportError {
        written_count: files,
        error_count: errors.len(),
        errors,
    }
    .into())
}
