//! Protection of `:placeholder` tokens during machine translation.

use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[A-Za-z_][A-Za-z0-9_]*").expect("valid placeholder regex"));

/// A value whose placeholders were swapped for anchors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Masked {
    text: String,
    placeholders: Vec<String>,
}

impl Masked {
    /// Replaces every placeholder of `text` by an anchor `_PH<n>_`.
    ///
    /// Repeated placeholders share one anchor.
    pub fn new(text: &str) -> Self {
        let mut placeholders: Vec<String> = Vec::new();

        let masked = PLACEHOLDER.replace_all(text, |caps: &regex::Captures<'_>| {
            let token = &caps[0];
            let index = match placeholders.iter().position(|p| p == token) {
                Some(index) => index,
                None => {
                    placeholders.push(token.to_string());
                    placeholders.len() - 1
                },
            };
            anchor(index)
        });

        Self {
            text: masked.into_owned(),
            placeholders,
        }
    }

    /// The text to send to the provider.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Puts the placeholders back into a translated text.
    pub fn restore(&self, translated: &str) -> String {
        let mut restored = translated.to_string();
        for (index, placeholder) in self.placeholders.iter().enumerate() {
            let anchor = anchor(index);
            if !restored.contains(&anchor) {
                tracing::debug!(%placeholder, "placeholder anchor lost in translation");
            }
            restored = restored.replace(&anchor, placeholder);
        }
        restored
    }
}

fn anchor(index: usize) -> String {
    format!("_PH{index}_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_mask() {
        let masked = Masked::new("Welcome :name, you have :count new messages");
        assert_eq!(masked.text(), "Welcome _PH0_, you have _PH1_ new messages");
        assert_eq!(masked.placeholders(), [":name", ":count"]);
    }

    #[test]
    fn test_repeated_placeholder_shares_anchor() {
        let masked = Masked::new(":attribute and :other, then :attribute again");
        assert_eq!(masked.text(), "_PH0_ and _PH1_, then _PH0_ again");
    }

    #[test]
    fn test_restore_after_reordering() {
        let masked = Masked::new(":count items for :name");
        let translated = "Für _PH1_: _PH0_ Artikel";
        assert_eq!(masked.restore(translated), "Für :name: :count Artikel");
    }

    #[test]
    fn test_many_placeholders_do_not_collide() {
        let text: String = (0..12).map(|i| format!(":p{i} ")).collect();
        let masked = Masked::new(&text);
        assert!(masked.text().contains("_PH1_"));
        assert!(masked.text().contains("_PH11_"));
        assert_eq!(masked.restore(masked.text()), text);
    }

    #[rstest]
    #[case("No placeholders here")]
    #[case("Time 12:30")]
    #[case("Ratio 1:2")]
    #[case("")]
    fn test_text_without_placeholders_is_unchanged(#[case] text: &str) {
        let masked = Masked::new(text);
        assert_eq!(masked.text(), text);
        assert!(masked.placeholders().is_empty());
    }
}
