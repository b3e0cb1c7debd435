#![doc = include_str!("../README.md")]

pub mod aws;
mod batch;
pub mod error;
pub mod mock;
pub mod placeholder;
mod provider;
mod service;

pub use batch::{BatchOutcome, translate_values};
pub use error::TranslateError;
pub use provider::ProviderKind;
pub use service::TranslationService;
