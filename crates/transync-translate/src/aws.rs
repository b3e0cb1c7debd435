use crate::error::TranslateError;
use crate::placeholder::Masked;
use crate::service::TranslationService;
use aws_sdk_translate::Client;
use aws_sdk_translate::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_translate::error::DisplayErrorContext;
use tokio::runtime::{Builder, Runtime};
use transync_toml::AwsSettings;

const NAME: &str = "aws";

/// Language codes accepted by Amazon Translate.
const LOCALES: &[&str] = &[
    "ar", "zh", "zh-TW", "cs", "da", "nl", "en", "fi", "fr", "de", "he", "id", "it", "ja", "ko",
    "pl", "pt", "ru", "es", "sv", "tr",
];

/// USD per character.
const PRICE_PER_CHARACTER: f64 = 0.000015;

/// Amazon Translate.
///
/// Requests are sent one at a time on a private single-threaded runtime.
pub struct AwsTranslator {
    runtime: Runtime,
    client: Client,
}

impl AwsTranslator {
    pub fn new(settings: &AwsSettings) -> Result<Self, TranslateError> {
        let (Some(key), Some(secret)) = (settings.key.as_deref(), settings.secret.as_deref()) else {
            return Err(TranslateError::NotConfigured {
                provider: NAME,
                reason: "missing access key or secret",
            });
        };

        let runtime = Builder::new_current_thread().enable_all().build()?;

        let config = aws_sdk_translate::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region().to_string()))
            .credentials_provider(Credentials::new(key, secret, None, None, "transync"))
            .build();

        tracing::debug!(region = settings.region(), "created Amazon Translate client");

        Ok(Self {
            runtime,
            client: Client::from_conf(config),
        })
    }
}

impl TranslationService for AwsTranslator {
    fn name(&self) -> &str {
        NAME
    }

    fn available_locales(&self) -> &[&str] {
        LOCALES
    }

    fn price_per_character(&self) -> f64 {
        PRICE_PER_CHARACTER
    }

    fn translate(
        &self,
        source: &str,
        target: &str,
        text: &str,
    ) -> Result<Option<String>, TranslateError> {
        if text.is_empty() {
            return Ok(None);
        }

        let masked = Masked::new(text);
        let request = self
            .client
            .translate_text()
            .source_language_code(source)
            .target_language_code(target)
            .text(masked.text())
            .send();

        let output = self
            .runtime
            .block_on(request)
            .map_err(|err| TranslateError::request(NAME, DisplayErrorContext(&err)))?;

        Ok(Some(masked.restore(output.translated_text())))
    }
}
