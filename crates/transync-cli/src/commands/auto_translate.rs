//! Auto-translate command: fills the values a locale is missing with a
//! machine translation provider.

use crate::commands::common::parse_locale;
use crate::commands::{Project, ProjectArgs, render_write_report};
use crate::core::{
    CliError, NoProviderError, ProviderNotConfiguredError, UnsupportedLocaleError,
};
use crate::utils::ui;
use clap::Parser;
use transync_core::{LocaleValues, ValueStore, Writer};
use transync_translate::{ProviderKind, TranslationService, translate_values};

/// Arguments for the auto-translate command.
#[derive(Debug, Parser)]
pub struct AutoTranslateArgs {
    /// Locale to translate into.
    #[arg(short, long)]
    pub locale: String,

    /// Provider to use (defaults to the first configured one).
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Only translate this namespace ("" for the default namespace).
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Skip the cost confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be written without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the auto-translate command.
pub fn run_auto_translate(project: &ProjectArgs, args: AutoTranslateArgs) -> Result<(), CliError> {
    let project = Project::open(project)?;
    let target = parse_locale(&args.locale)?;

    ui::print_auto_translate_header();

    if target == project.default_locale {
        ui::print_default_locale_target(&target);
        return Ok(());
    }

    let namespace = args.namespace.as_deref();
    project.check_namespace(namespace)?;

    let kind = choose_provider(&project, args.provider)?;
    let service = kind.build(&project.config)?;
    for locale in [project.default_locale.as_str(), target.as_str()] {
        check_locale(service.as_ref(), locale)?;
    }

    let values = ValueStore::new(&project.index).get_untranslated(
        &project.default_locale,
        &target,
        namespace,
    )?;
    if values.is_empty() {
        ui::print_all_translated(&target);
        return Ok(());
    }

    ui::print_translation_cost(values.len(), service.name(), service.calculate_costs(&values));
    if !args.yes && !ui::confirm("Continue?")? {
        ui::print_aborted();
        return Ok(());
    }

    let pb = ui::create_progress_bar(values.len() as u64, "Translating...");
    let outcome = translate_values(
        service.as_ref(),
        &project.default_locale,
        &target,
        &values,
        |key| {
            pb.set_message(key.to_string());
            pb.inc(1);
        },
    );
    pb.finish_and_clear();

    for (key, error) in &outcome.failed {
        ui::print_translation_failed(key, &error.to_string());
    }
    ui::print_translation_summary(outcome.translated.len(), values.len());

    if outcome.translated.is_empty() {
        return Ok(());
    }

    let report = Writer::new(&project.index)
        .dry_run(args.dry_run)
        .write(&LocaleValues::from([(target, outcome.translated)]));

    render_write_report(&report, args.dry_run)
}

fn choose_provider(
    project: &Project,
    requested: Option<ProviderKind>,
) -> Result<ProviderKind, CliError> {
    match requested {
        Some(kind) if kind.is_configured(&project.config) => Ok(kind),
        Some(kind) => {
            let available = ProviderKind::available(&project.config)
                .iter()
                .map(ProviderKind::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Err(ProviderNotConfiguredError {
                provider: kind.to_string(),
                available,
            }
            .into())
        },
        None => ProviderKind::default_for(&project.config).ok_or_else(|| NoProviderError.into()),
    }
}

fn check_locale(service: &dyn TranslationService, locale: &str) -> Result<(), CliError> {
    if service.supports_locale(locale) {
        return Ok(());
    }

    Err(UnsupportedLocaleError {
        provider: service.name().to_string(),
        locale: locale.to_string(),
        supported: service.available_locales().join(", "),
    }
    .into())
}
