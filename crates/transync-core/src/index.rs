//! Discovery of translation files.
//!
//! Every namespace maps to a base directory laid out as
//! `{base}/{locale}/{file}.php`.

use crate::error::InvalidFileError;
use crate::key::is_file_key;
use crate::php::{self, FILE_EXTENSION};
use crate::tree::Tree;
use fs_err as fs;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Translation files per locale, then per namespace, in discovery order.
pub type TranslationFiles = BTreeMap<String, IndexMap<String, Vec<PathBuf>>>;

/// Source of the namespace to base directory mapping.
pub trait NamespaceRegistry {
    /// Every registered namespace with its base directory. The default
    /// namespace is the empty string.
    fn namespaces(&self) -> &IndexMap<String, PathBuf>;

    /// Base directory of one namespace.
    fn base_dir(&self, namespace: &str) -> Option<&Path> {
        self.namespaces().get(namespace).map(PathBuf::as_path)
    }
}

impl NamespaceRegistry for IndexMap<String, PathBuf> {
    fn namespaces(&self) -> &IndexMap<String, PathBuf> {
        self
    }
}

impl<R: NamespaceRegistry + ?Sized> NamespaceRegistry for &R {
    fn namespaces(&self) -> &IndexMap<String, PathBuf> {
        (**self).namespaces()
    }
}

/// Enumerates and resolves translation files of every namespace.
#[derive(Clone, Debug)]
pub struct FileIndex<R = IndexMap<String, PathBuf>> {
    registry: R,
}

impl<R: NamespaceRegistry> FileIndex<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Lists translation files, optionally restricted to one locale and/or
    /// one namespace.
    ///
    /// Namespaces whose directory does not exist are skipped. Locales and
    /// files are sorted by name; only `*.php` files directly inside a locale
    /// directory are considered.
    pub fn list_files(
        &self,
        locale: Option<&str>,
        namespace: Option<&str>,
    ) -> io::Result<TranslationFiles> {
        let mut files = TranslationFiles::new();

        for (ns, base) in self.registry.namespaces() {
            if namespace.is_some_and(|wanted| wanted != ns) {
                continue;
            }
            if !base.is_dir() {
                tracing::debug!(namespace = %ns, dir = %base.display(), "namespace directory not found");
                continue;
            }

            for locale_name in locale_dirs(base)? {
                if locale.is_some_and(|wanted| wanted != locale_name) {
                    continue;
                }

                let paths = translation_files_in(&base.join(&locale_name))?;
                tracing::debug!(namespace = %ns, locale = %locale_name, files = paths.len(), "discovered translation files");
                if !paths.is_empty() {
                    files
                        .entry(locale_name)
                        .or_default()
                        .insert(ns.clone(), paths);
                }
            }
        }

        Ok(files)
    }

    /// Every locale directory found in any namespace.
    pub fn locales(&self) -> io::Result<BTreeSet<String>> {
        let mut locales = BTreeSet::new();
        for base in self.registry.namespaces().values() {
            if base.is_dir() {
                locales.extend(locale_dirs(base)?);
            }
        }
        Ok(locales)
    }

    /// Location of the file `file` of `namespace` for `locale`, whether it
    /// exists or not. `None` when the namespace is not registered.
    pub fn file_path(&self, namespace: &str, locale: &str, file: &str) -> Option<PathBuf> {
        self.registry
            .base_dir(namespace)
            .map(|base| base.join(locale).join(format!("{file}.{FILE_EXTENSION}")))
    }

    pub fn load_tree(&self, path: &Path) -> Result<Tree, InvalidFileError> {
        php::load_tree(path)
    }
}

/// File key of a translation file: its name without the extension.
pub fn file_key(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

fn locale_dirs(base: &Path) -> io::Result<Vec<String>> {
    let mut locales = Vec::new();

    for entry in fs::read_dir(base)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            locales.push(name);
        }
    }

    locales.sort();
    Ok(locales)
}

fn translation_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file()
            || path.extension().is_none_or(|ext| ext != FILE_EXTENSION)
        {
            continue;
        }
        if !file_key(&path).is_some_and(is_file_key) {
            tracing::warn!(path = %path.display(), "skipping translation file whose name is not a valid file key");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}
