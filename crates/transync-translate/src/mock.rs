use crate::error::TranslateError;
use crate::placeholder::Masked;
use crate::service::TranslationService;
use std::collections::HashMap;

const NAME: &str = "mock";

/// How the [`MockTranslator`] answers.
#[derive(Clone, Debug, Default)]
pub enum MockMode {
    /// Appends `_<target>` to the text.
    #[default]
    Suffix,
    /// Looks the text up; unknown texts are left untranslated.
    Mappings(HashMap<String, String>),
    /// Fails every request.
    Failing,
}

/// Offline provider that supports every locale and costs nothing.
#[derive(Clone, Debug, Default)]
pub struct MockTranslator {
    mode: MockMode,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode }
    }
}

impl TranslationService for MockTranslator {
    fn name(&self) -> &str {
        NAME
    }

    fn available_locales(&self) -> &[&str] {
        &[]
    }

    fn supports_locale(&self, _locale: &str) -> bool {
        true
    }

    fn price_per_character(&self) -> f64 {
        0.0
    }

    fn translate(
        &self,
        _source: &str,
        target: &str,
        text: &str,
    ) -> Result<Option<String>, TranslateError> {
        if text.is_empty() {
            return Ok(None);
        }

        match &self.mode {
            MockMode::Suffix => {
                let masked = Masked::new(text);
                Ok(Some(masked.restore(&format!("{}_{target}", masked.text()))))
            },
            MockMode::Mappings(mappings) => Ok(mappings.get(text).cloned()),
            MockMode::Failing => Err(TranslateError::request(NAME, "simulated failure")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_keeps_placeholders() {
        let translator = MockTranslator::default();
        assert_eq!(
            translator.translate("en", "de", "Hello :name").unwrap(),
            Some("Hello :name_de".to_string())
        );
        assert_eq!(translator.translate("en", "de", "").unwrap(), None);
    }

    #[test]
    fn test_mappings() {
        let translator = MockTranslator::new(MockMode::Mappings(HashMap::from([(
            "Hi".to_string(),
            "Hallo".to_string(),
        )])));

        assert_eq!(
            translator.translate("en", "de", "Hi").unwrap(),
            Some("Hallo".to_string())
        );
        assert_eq!(translator.translate("en", "de", "Bye").unwrap(), None);
    }

    #[test]
    fn test_failing() {
        let translator = MockTranslator::new(MockMode::Failing);
        assert!(matches!(
            translator.translate("en", "de", "Hi"),
            Err(TranslateError::Request { .. })
        ));
    }
}
