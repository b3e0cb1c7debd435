//! Storage format of translation files.
//!
//! A translation file is a PHP script returning a nested array literal:
//!
//! ```php
//! <?php
//!
//! return [
//!     'failed' => 'These credentials do not match our records.',
//!     'password' => [
//!         'reset' => 'Your password has been reset.',
//!     ],
//! ];
//! ```
//!
//! Only the literal subset used by translation files is understood: short
//! and long array syntax, quoted strings (optionally joined with `.`),
//! numbers, and comments. Anything else is rejected rather than evaluated.

mod parse;
mod serialize;

pub use parse::parse;
pub use serialize::serialize;

use crate::error::InvalidFileError;
use crate::tree::Tree;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Extension of translation files.
pub const FILE_EXTENSION: &str = "php";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PhpError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("the file does not return an array")]
    NotAnArray,

    #[error("unsupported value `{found}` for key '{key}'")]
    UnsupportedValue { key: String, found: String },
}

/// Reads and parses one translation file.
pub fn load_tree(path: &Path) -> Result<Tree, InvalidFileError> {
    let source = fs::read_to_string(path).map_err(|err| InvalidFileError::new(path, err))?;
    parse(&source).map_err(|err| InvalidFileError::new(path, err))
}
