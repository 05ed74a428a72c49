//! Language-preference selection over localized text entries.

use schema::{FlavorTextEntry, Genus};

/// Returned when there is no entry at all to choose from.
pub const UNKNOWN_TEXT: &str = "Desconocido";

/// One piece of text tagged with a language code.
pub trait LocalizedEntry {
    fn language(&self) -> &str;
    fn text(&self) -> &str;
}

impl LocalizedEntry for FlavorTextEntry {
    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.flavor_text
    }
}

impl LocalizedEntry for Genus {
    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.genus
    }
}

/// Plain `{ language, text }` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    pub language: String,
    pub text: String,
}

impl LocalizedText {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

impl LocalizedEntry for LocalizedText {
    fn language(&self) -> &str {
        &self.language
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Picks the text of the best entry for `preference`.
///
/// Candidates are tried in order: the first entry in each preferred
/// language (most preferred language first), then the first entry of any
/// language, then [`UNKNOWN_TEXT`].
pub fn pick_localized<E: LocalizedEntry>(entries: &[E], preference: &[&str]) -> String {
    preference
        .iter()
        .find_map(|language| entries.iter().find(|entry| entry.language() == *language))
        .or_else(|| entries.first())
        .map(|entry| entry.text().to_string())
        .unwrap_or_else(|| UNKNOWN_TEXT.to_string())
}

/// Flavor text comes with hard line breaks and form feeds from the games'
/// text boxes; flatten it into one line with single spaces.
pub fn normalize_flavor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
