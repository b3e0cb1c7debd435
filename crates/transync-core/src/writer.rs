//! Writes flat values back into translation files.
//!
//! Values are grouped per file, rebuilt into trees and merged into what is
//! already on disk. Existing keys are never removed.

use crate::error::{InvalidFileError, KeyParseError, WriteError};
use crate::index::{FileIndex, NamespaceRegistry};
use crate::key::FlatKey;
use crate::php;
use crate::tree::{FlatValues, Tree, count_leaves, merge, unflatten};
use fs_err as fs;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Flat values to write, per locale.
pub type LocaleValues = BTreeMap<String, FlatValues>;

/// One translation file produced by the [`Writer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFile {
    pub locale: String,
    pub namespace: String,
    pub file: String,
    pub path: PathBuf,
    /// Number of values merged into the file.
    pub values: usize,
    /// Content of the file before the merge, `None` if it did not exist.
    pub before: Option<String>,
    /// Content after the merge.
    pub after: String,
}

impl WrittenFile {
    pub fn created(&self) -> bool {
        self.before.is_none()
    }

    pub fn changed(&self) -> bool {
        self.before.as_deref() != Some(self.after.as_str())
    }
}

/// A (namespace, file) group that could not be written.
#[derive(Debug)]
pub struct GroupFailure {
    pub locale: String,
    pub namespace: String,
    pub file: String,
    pub error: WriteError,
}

/// Outcome of [`Writer::write`].
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<WrittenFile>,
    /// Keys that could not be decomposed; their values were not written.
    pub skipped: Vec<KeyParseError>,
    pub failed: Vec<GroupFailure>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of values merged into files.
    pub fn values_written(&self) -> usize {
        self.written.iter().map(|file| file.values).sum()
    }
}

/// Merges flat values into the translation files of a [`FileIndex`].
pub struct Writer<'a, R> {
    index: &'a FileIndex<R>,
    dry_run: bool,
}

impl<'a, R: NamespaceRegistry> Writer<'a, R> {
    pub fn new(index: &'a FileIndex<R>) -> Self {
        Self {
            index,
            dry_run: false,
        }
    }

    /// In dry-run mode the merged content is computed but nothing is written.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Writes every value, one file per (locale, namespace, file key).
    ///
    /// Invalid keys and empty values are skipped. A file that fails does not
    /// prevent the other files from being written.
    pub fn write(&self, values: &LocaleValues) -> WriteReport {
        let mut report = WriteReport::default();

        for (locale, flat) in values {
            let mut groups: IndexMap<(String, String), Vec<(String, String)>> = IndexMap::new();

            for (key, value) in flat {
                if value.is_empty() {
                    tracing::debug!(%key, %locale, "skipping empty value");
                    continue;
                }
                match FlatKey::decompose(key) {
                    Ok(FlatKey {
                        namespace,
                        file,
                        path,
                    }) => groups
                        .entry((namespace, file))
                        .or_default()
                        .push((path, value.clone())),
                    Err(err) => {
                        tracing::warn!("{err}, skipping");
                        report.skipped.push(err);
                    },
                }
            }

            for ((namespace, file), entries) in groups {
                match self.write_file(&namespace, &file, locale, unflatten(entries)) {
                    Ok(written) => report.written.push(written),
                    Err(error) => {
                        tracing::warn!(%locale, %namespace, %file, "failed to write translation file: {error}");
                        report.failed.push(GroupFailure {
                            locale: locale.clone(),
                            namespace,
                            file,
                            error,
                        });
                    },
                }
            }
        }

        report
    }

    /// Merges `tree` into one translation file, creating it if needed.
    pub fn write_file(
        &self,
        namespace: &str,
        file: &str,
        locale: &str,
        tree: Tree,
    ) -> Result<WrittenFile, WriteError> {
        let path = self
            .index
            .file_path(namespace, locale, file)
            .ok_or_else(|| WriteError::UnknownNamespace(namespace.to_string()))?;
        let values = count_leaves(&tree);

        let (before, mut merged) = if path.is_file() {
            let before = fs::read_to_string(&path)?;
            let existing = php::parse(&before).map_err(|err| InvalidFileError::new(&path, err))?;
            (Some(before), existing)
        } else {
            (None, Tree::new())
        };

        merge(&mut merged, tree);
        let after = php::serialize(&merged);

        let written = WrittenFile {
            locale: locale.to_string(),
            namespace: namespace.to_string(),
            file: file.to_string(),
            path,
            values,
            before,
            after,
        };

        if self.dry_run {
            tracing::debug!(path = %written.path.display(), "dry run, not writing");
        } else if written.changed() {
            if let Some(dir) = written.path.parent() {
                fs::create_dir_all(dir)?;
            }
            replace_file(&written.path, &written.after)?;
            tracing::debug!(path = %written.path.display(), values, "wrote translation file");
        }

        Ok(written)
    }
}

/// Writes `contents` next to `path` and renames it over `path`.
fn replace_file(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    Ok(())
}
