//! CSV round trip for human translators.
//!
//! An export holds one row per key:
//!
//! ```text
//! translation_string;en;de
//! messages.hello;Hi;
//! ```
//!
//! The translator fills in the third column; rows left empty are ignored on
//! import.

use crate::tree::FlatValues;
use crate::writer::LocaleValues;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::io;
use thiserror::Error;

/// First cell of the header row.
pub const HEADER_KEY: &str = "translation_string";

pub const DEFAULT_DELIMITER: u8 = b';';

#[derive(Debug, Error)]
pub enum CsvError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid CSV file: {0}")]
    Format(String),

    #[error("invalid delimiter '{0}': expected a single ASCII character")]
    Delimiter(String),
}

/// Translations read back from an exported file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvImport {
    pub source_locale: String,
    pub target_locale: String,
    /// Filled-in translations, keyed by flat key.
    pub values: FlatValues,
}

impl CsvImport {
    /// The values keyed by their target locale, ready for the writer.
    pub fn into_locale_values(self) -> LocaleValues {
        LocaleValues::from([(self.target_locale, self.values)])
    }
}

/// Name of the export file for a pair of locales.
pub fn export_file_name(source_locale: &str, target_locale: &str) -> String {
    format!("translation_{source_locale}-{target_locale}.csv")
}

/// Parses a delimiter given on the command line or in the configuration.
///
/// `\t` is accepted as an alias for a tab.
pub fn parse_delimiter(input: &str) -> Result<u8, CsvError> {
    if input == "\\t" {
        return Ok(b'\t');
    }
    match input.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(CsvError::Delimiter(input.to_string())),
    }
}

/// Writes the header and one `[key, value, ""]` row per value.
pub fn export<W: io::Write>(
    writer: W,
    delimiter: u8,
    source_locale: &str,
    target_locale: &str,
    values: &FlatValues,
) -> Result<(), CsvError> {
    let mut csv = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv.write_record([HEADER_KEY, source_locale, target_locale])?;
    for (key, value) in values {
        csv.write_record([key.as_str(), value.as_str(), ""])?;
    }
    csv.flush()?;

    Ok(())
}

/// Reads an exported file back.
///
/// The whole input is validated before anything is returned, so a malformed
/// file never leads to a partial write.
pub fn import<R: io::Read>(
    reader: R,
    delimiter: u8,
    expected_target: Option<&str>,
) -> Result<CsvImport, CsvError> {
    let mut csv = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);
    let mut records = csv.records();

    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| CsvError::Format("the file is empty".to_string()))?;

    let first = header.get(0).map(|cell| cell.trim_start_matches('\u{feff}'));
    if first != Some(HEADER_KEY) || header.len() != 3 {
        return Err(CsvError::Format(format!(
            "expected a header row `{HEADER_KEY}, <source>, <target>`"
        )));
    }

    let source_locale = header.get(1).unwrap_or_default().trim().to_string();
    let target_locale = header.get(2).unwrap_or_default().trim().to_string();
    if target_locale.is_empty() {
        return Err(CsvError::Format("the header names no target locale".to_string()));
    }
    if let Some(expected) = expected_target
        && expected != target_locale
    {
        return Err(CsvError::Format(format!(
            "the file translates to '{target_locale}', not '{expected}'"
        )));
    }

    let mut values = FlatValues::new();
    for record in records {
        let record = record?;
        let key = record.get(0).unwrap_or_default();
        let translation = record.get(2).unwrap_or_default();

        if key.is_empty() || key == HEADER_KEY || translation.is_empty() {
            continue;
        }
        values.insert(key.to_string(), translation.to_string());
    }

    Ok(CsvImport {
        source_locale,
        target_locale,
        values,
    })
}
