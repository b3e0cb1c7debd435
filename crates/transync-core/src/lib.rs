#![doc = include_str!("../README.md")]

pub mod csv_io;
pub mod error;
pub mod index;
pub mod key;
pub mod php;
pub mod store;
pub mod tree;
pub mod writer;

pub use error::{InvalidFileError, InvalidFileKind, KeyParseError, StoreError, WriteError};
pub use index::{FileIndex, NamespaceRegistry, TranslationFiles};
pub use key::FlatKey;
pub use store::{LocaleSummary, ValueStore, untranslated};
pub use tree::{FlatValues, Node, Tree};
pub use writer::{GroupFailure, LocaleValues, WriteReport, Writer, WrittenFile};
