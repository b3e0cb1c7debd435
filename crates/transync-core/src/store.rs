//! Locale-wide flat values and the untranslated difference between locales.

use crate::error::StoreError;
use crate::index::{FileIndex, NamespaceRegistry, file_key};
use crate::key::file_prefix;
use crate::tree::{FlatValues, flatten};

/// Per-locale statistics shown by the overview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleSummary {
    pub locale: String,
    /// Number of translation files, all namespaces included.
    pub files: usize,
    /// Number of flat values.
    pub values: usize,
    /// Number of values of the default locale this locale lacks.
    pub missing: usize,
    /// Whether this is the default locale.
    pub primary: bool,
}

/// Aggregates the translation files of a [`FileIndex`] into flat values.
pub struct ValueStore<'a, R> {
    index: &'a FileIndex<R>,
}

impl<'a, R: NamespaceRegistry> ValueStore<'a, R> {
    pub fn new(index: &'a FileIndex<R>) -> Self {
        Self { index }
    }

    /// Loads and flattens every matching file into one map.
    ///
    /// Keys are prefixed with `namespace::file.` (`file.` for the default
    /// namespace). When two files produce the same key, the later one wins.
    pub fn get_values(
        &self,
        locale: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<FlatValues, StoreError> {
        let mut values = FlatValues::new();

        for namespaces in self.index.list_files(locale, namespace)?.values() {
            for (ns, paths) in namespaces {
                for path in paths {
                    let Some(file) = file_key(path) else {
                        tracing::warn!(path = %path.display(), "skipping file with a non UTF-8 name");
                        continue;
                    };
                    let tree = self.index.load_tree(path)?;
                    values.extend(flatten(&tree, &file_prefix(ns, file)));
                }
            }
        }

        Ok(values)
    }

    /// Values of `source` that `target` does not have yet.
    pub fn get_untranslated(
        &self,
        source: &str,
        target: &str,
        namespace: Option<&str>,
    ) -> Result<FlatValues, StoreError> {
        let source_values = self.get_values(Some(source), namespace)?;
        let target_values = self.get_values(Some(target), namespace)?;
        Ok(untranslated(&source_values, &target_values))
    }

    /// Summarizes every locale found on disk against `default_locale`.
    pub fn overview(&self, default_locale: &str) -> Result<Vec<LocaleSummary>, StoreError> {
        let files = self.index.list_files(None, None)?;
        let default_values = self.get_values(Some(default_locale), None)?;

        let mut summaries = Vec::new();
        for locale in self.index.locales()? {
            let values = self.get_values(Some(&locale), None)?;
            summaries.push(LocaleSummary {
                files: files
                    .get(&locale)
                    .map_or(0, |namespaces| namespaces.values().map(Vec::len).sum()),
                values: values.len(),
                missing: untranslated(&default_values, &values).len(),
                primary: locale == default_locale,
                locale,
            });
        }

        Ok(summaries)
    }
}

/// Entries of `source` whose key is absent from `target`, in source order.
///
/// A key present in `target` with an empty value counts as translated.
pub fn untranslated(source: &FlatValues, target: &FlatValues) -> FlatValues {
    source
        .iter()
        .filter(|(key, _)| !target.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn values<const N: usize>(entries: [(&str, &str); N]) -> FlatValues {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn fixture() -> (TempDir, FileIndex) {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        write(
            &root.join("lang/en/messages.php"),
            "<?php return ['hello' => 'Hi', 'bye' => 'Bye', 'menu' => ['open' => 'Open']];",
        );
        write(
            &root.join("lang/en/auth.php"),
            "<?php return ['failed' => 'Failed'];",
        );
        write(
            &root.join("lang/de/messages.php"),
            "<?php return ['hello' => 'Hallo', 'bye' => ''];",
        );
        write(
            &root.join("packages/courier/lang/en/mail.php"),
            "<?php return ['subject' => 'Subject'];",
        );

        let mut registry = IndexMap::new();
        registry.insert(String::new(), root.join("lang"));
        registry.insert("courier".to_string(), root.join("packages/courier/lang"));

        (temp, FileIndex::new(registry))
    }

    #[test]
    fn test_get_values_prefixes_keys() {
        let (_temp, index) = fixture();
        let store = ValueStore::new(&index);

        let en = store.get_values(Some("en"), None).unwrap();
        assert_eq!(
            en,
            values([
                ("auth.failed", "Failed"),
                ("messages.hello", "Hi"),
                ("messages.bye", "Bye"),
                ("messages.menu.open", "Open"),
                ("courier::mail.subject", "Subject"),
            ])
        );
    }

    #[test]
    fn test_files_without_a_valid_file_key_are_ignored() {
        let (temp, index) = fixture();
        write(
            &temp.path().join("lang/en/auth.v.php"),
            "<?php return ['failed' => 'Failed'];",
        );
        write(&temp.path().join("lang/en/v2.php"), "<?php return ['title' => 'Title'];");
        let store = ValueStore::new(&index);

        let en = store.get_values(Some("en"), Some("")).unwrap();
        assert!(!en.contains_key("auth.v.failed"));
        assert!(!en.contains_key("v2.title"));

        let missing = store.get_untranslated("en", "de", Some("")).unwrap();
        assert_eq!(
            missing,
            values([("auth.failed", "Failed"), ("messages.menu.open", "Open")])
        );
    }

    #[test]
    fn test_get_values_single_namespace() {
        let (_temp, index) = fixture();
        let store = ValueStore::new(&index);

        let courier = store.get_values(Some("en"), Some("courier")).unwrap();
        assert_eq!(courier, values([("courier::mail.subject", "Subject")]));
    }

    #[test]
    fn test_get_values_invalid_file_aborts() {
        let (temp, index) = fixture();
        write(&temp.path().join("lang/en/broken.php"), "<?php return 'nope';");

        let err = ValueStore::new(&index)
            .get_values(Some("en"), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFile(_)));
    }

    #[test]
    fn test_get_untranslated() {
        let (_temp, index) = fixture();
        let store = ValueStore::new(&index);

        let missing = store.get_untranslated("en", "de", None).unwrap();
        assert_eq!(
            missing,
            values([
                ("auth.failed", "Failed"),
                ("messages.menu.open", "Open"),
                ("courier::mail.subject", "Subject"),
            ])
        );
    }

    #[test]
    fn test_untranslated_is_asymmetric() {
        let a = values([("a", "1"), ("b", "2")]);
        let b = values([("a", "x"), ("c", "3")]);

        assert_eq!(untranslated(&a, &b), values([("b", "2")]));
        assert_eq!(untranslated(&b, &a), values([("c", "3")]));
        assert!(untranslated(&a, &a).is_empty());
    }

    #[test]
    fn test_empty_target_value_counts_as_translated() {
        let source = values([("messages.bye", "Bye")]);
        let target = values([("messages.bye", "")]);
        assert!(untranslated(&source, &target).is_empty());
    }

    #[test]
    fn test_overview() {
        let (_temp, index) = fixture();
        let summaries = ValueStore::new(&index).overview("en").unwrap();

        assert_eq!(
            summaries,
            vec![
                LocaleSummary {
                    locale: "de".to_string(),
                    files: 1,
                    values: 2,
                    missing: 3,
                    primary: false,
                },
                LocaleSummary {
                    locale: "en".to_string(),
                    files: 3,
                    values: 5,
                    missing: 0,
                    primary: true,
                },
            ]
        );
    }
}
