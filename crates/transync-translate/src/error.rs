use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    /// The provider lacks credentials or settings.
    #[error("provider '{provider}' is not configured: {reason}")]
    NotConfigured {
        provider: &'static str,
        reason: &'static str,
    },

    /// The provider cannot translate from or into this locale.
    #[error("provider '{provider}' does not support locale '{locale}'")]
    UnsupportedLocale { provider: String, locale: String },

    /// The provider rejected the request or could not be reached.
    #[error("provider '{provider}' failed to translate: {message}")]
    Request { provider: String, message: String },

    #[error("failed to start the translation runtime: {0}")]
    Runtime(#[from] io::Error),
}

impl TranslateError {
    pub fn request(provider: &str, message: impl ToString) -> Self {
        Self::Request {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }
}
