use crate::error::TranslateError;
use transync_core::FlatValues;

/// A machine translation provider.
pub trait TranslationService {
    /// Identifier shown to the user and used in logs.
    fn name(&self) -> &str;

    /// Language codes the provider accepts, as source or target.
    fn available_locales(&self) -> &[&str];

    /// Price in USD per character of source text.
    fn price_per_character(&self) -> f64;

    fn supports_locale(&self, locale: &str) -> bool {
        self.available_locales().contains(&locale)
    }

    /// Estimated price of translating every value, rounded to cents.
    ///
    /// Characters are counted as UTF-8 bytes.
    fn calculate_costs(&self, values: &FlatValues) -> f64 {
        let characters: usize = values.values().map(String::len).sum();
        (characters as f64 * self.price_per_character() * 100.0).round() / 100.0
    }

    /// Translates one value. Empty input, and input the provider has no
    /// translation for, yields `None`.
    fn translate(
        &self,
        source: &str,
        target: &str,
        text: &str,
    ) -> Result<Option<String>, TranslateError>;
}
