//! Flat translation keys.
//!
//! A flat key addresses one leaf of one translation file:
//!
//! ```text
//! courier::validation.attributes.email
//! ^^^^^^^  ^^^^^^^^^^ ^^^^^^^^^^^^^^^^
//! namespace  file key  path inside the file
//! ```
//!
//! The `namespace::` prefix is omitted for the default namespace.

use crate::error::KeyParseError;
use std::fmt;
use std::str::FromStr;

/// Separator between the namespace and the file key.
pub const NAMESPACE_DELIMITER: &str = "::";

/// A decomposed flat key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FlatKey {
    /// Namespace, empty for the default namespace.
    pub namespace: String,
    /// File stem of the translation file.
    pub file: String,
    /// Dot-separated path inside the file.
    pub path: String,
}

impl FlatKey {
    pub fn new(
        namespace: impl Into<String>,
        file: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            file: file.into(),
            path: path.into(),
        }
    }

    /// Splits a flat key into namespace, file key and path.
    ///
    /// Only the first `::` separates the namespace; anything before it,
    /// including the empty string, is the namespace.
    pub fn decompose(key: &str) -> Result<Self, KeyParseError> {
        let (namespace, rest) = key.split_once(NAMESPACE_DELIMITER).unwrap_or(("", key));

        if !namespace.chars().all(is_namespace_char) {
            return Err(KeyParseError::new(
                key,
                "namespace may only contain lowercase letters, digits, ':', '.' and '_'",
            ));
        }

        let Some((file, path)) = rest.split_once('.') else {
            return Err(KeyParseError::new(key, "missing '.' after the file key"));
        };

        if !is_file_key(file) {
            return Err(KeyParseError::new(
                key,
                "file key may only contain letters, '_' and '-'",
            ));
        }

        if path.is_empty() {
            return Err(KeyParseError::new(key, "missing key path after the file key"));
        }

        Ok(Self::new(namespace, file, path))
    }

    /// Builds the flat key string for the given parts.
    pub fn compose(namespace: &str, file: &str, path: &str) -> String {
        format!("{}{}", file_prefix(namespace, file), path)
    }
}

/// Prefix shared by every flat key of one file, including the trailing dot.
pub fn file_prefix(namespace: &str, file: &str) -> String {
    if namespace.is_empty() {
        format!("{file}.")
    } else {
        format!("{namespace}{NAMESPACE_DELIMITER}{file}.")
    }
}

/// Whether `file` can name a translation file in a flat key.
pub fn is_file_key(file: &str) -> bool {
    !file.is_empty() && file.chars().all(is_file_char)
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ':' | '.' | '_')
}

fn is_file_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '-')
}

impl fmt::Display for FlatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::compose(&self.namespace, &self.file, &self.path))
    }
}

impl FromStr for FlatKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decompose(s)
    }
}
