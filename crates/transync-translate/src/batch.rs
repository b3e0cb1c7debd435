use crate::error::TranslateError;
use crate::service::TranslationService;
use transync_core::FlatValues;

/// Result of [`translate_values`].
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully translated values, in input order.
    pub translated: FlatValues,
    /// Keys the provider had no translation for.
    pub untranslated: Vec<String>,
    /// Keys whose request failed.
    pub failed: Vec<(String, TranslateError)>,
}

/// Translates `values` one by one from `source` into `target`.
///
/// `on_progress` is called after each value. Values that fail or come back
/// empty are left out of the outcome's `translated` map.
pub fn translate_values(
    service: &dyn TranslationService,
    source: &str,
    target: &str,
    values: &FlatValues,
    mut on_progress: impl FnMut(&str),
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (key, text) in values {
        match service.translate(source, target, text) {
            Ok(Some(translated)) if !translated.is_empty() => {
                outcome.translated.insert(key.clone(), translated);
            },
            Ok(_) => outcome.untranslated.push(key.clone()),
            Err(err) => {
                tracing::warn!(%key, provider = service.name(), "translation failed: {err}");
                outcome.failed.push((key.clone(), err));
            },
        }
        on_progress(key);
    }

    outcome
}
