//! Export command: writes the values a locale is missing to a CSV file.

use crate::commands::common::parse_locale;
use crate::commands::{Project, ProjectArgs};
use crate::core::CliError;
use crate::utils::ui;
use anyhow::Context as _;
use clap::Parser;
use std::io::{BufWriter, Write as _};
use std::path::PathBuf;
use transync_core::ValueStore;
use transync_core::csv_io::{self, export_file_name};

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Locale the file is meant to be translated into.
    #[arg(short, long)]
    pub locale: String,

    /// Export every value of the default locale, not just the missing ones.
    #[arg(long)]
    pub overwrite: bool,

    /// CSV delimiter (defaults to the configured one).
    #[arg(long = "seperator", visible_alias = "separator")]
    pub seperator: Option<String>,

    /// Only export this namespace ("" for the default namespace).
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Directory the CSV file is written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Run the export command.
pub fn run_export(project: &ProjectArgs, args: ExportArgs) -> Result<(), CliError> {
    let project = Project::open(project)?;
    let target = parse_locale(&args.locale)?;

    ui::print_export_header();

    if target == project.default_locale {
        ui::print_export_default_locale(&target);
        return Ok(());
    }

    let namespace = args.namespace.as_deref();
    project.check_namespace(namespace)?;
    let delimiter = project.delimiter(args.seperator.as_deref())?;

    let store = ValueStore::new(&project.index);
    let values = if args.overwrite {
        store.get_values(Some(&project.default_locale), namespace)?
    } else {
        store.get_untranslated(&project.default_locale, &target, namespace)?
    };

    if values.is_empty() {
        ui::print_nothing_to_export(&target);
        return Ok(());
    }

    fs_err::create_dir_all(&args.out_dir)?;
    let path = args
        .out_dir
        .join(export_file_name(&project.default_locale, &target));

    let file = fs_err::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    csv_io::export(
        &mut writer,
        delimiter,
        &project.default_locale,
        &target,
        &values,
    )?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), values = values.len(), "exported");
    ui::print_exported(values.len(), &path);
    Ok(())
}
