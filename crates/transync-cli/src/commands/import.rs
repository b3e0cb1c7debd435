//! Import command: writes the filled-in translations of a CSV file.

use crate::commands::common::parse_locale;
use crate::commands::{Project, ProjectArgs, render_write_report};
use crate::core::{CliError, CsvFormatError, ImportFileNotFoundError};
use crate::utils::ui;
use clap::Parser;
use std::io::BufReader;
use std::path::PathBuf;
use transync_core::Writer;
use transync_core::csv_io::{self, CsvError};

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// CSV file created by `transync export`.
    #[arg(short, long)]
    pub file: PathBuf,

    /// CSV delimiter (defaults to the configured one).
    #[arg(long = "seperator", visible_alias = "separator")]
    pub seperator: Option<String>,

    /// Refuse the file unless its target column is this locale.
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Show what would be written without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the import command.
pub fn run_import(project: &ProjectArgs, args: ImportArgs) -> Result<(), CliError> {
    let project = Project::open(project)?;
    let expected = args.locale.as_deref().map(parse_locale).transpose()?;

    ui::print_import_header();

    if !args.file.is_file() {
        return Err(ImportFileNotFoundError { path: args.file }.into());
    }

    let delimiter = project.delimiter(args.seperator.as_deref())?;
    let file = fs_err::File::open(&args.file)?;
    let import = csv_io::import(BufReader::new(file), delimiter, expected.as_deref()).map_err(
        |source| {
            let help = match &source {
                CsvError::Format(_) => Some(format!(
                    "Expected a file written by `transync export` with delimiter {:?}",
                    delimiter as char
                )),
                _ => None,
            };
            CsvFormatError {
                path: args.file.clone(),
                source,
                help,
            }
        },
    )?;

    parse_locale(&import.target_locale)?;

    if import.values.is_empty() {
        ui::print_nothing_to_import(&args.file);
        return Ok(());
    }

    tracing::debug!(
        source = %import.source_locale,
        target = %import.target_locale,
        values = import.values.len(),
        "importing"
    );

    let report = Writer::new(&project.index)
        .dry_run(args.dry_run)
        .write(&import.into_locale_values());

    render_write_report(&report, args.dry_run)
}
