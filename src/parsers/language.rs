//! Language detection. A question containing any character from the Hebrew
//! Unicode block is answered in Hebrew, anything else in English.

use serde::Serialize;

/// Reply language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// עברית
    Hebrew,
    /// English
    English,
}

impl Language {
    /// Detects the language of a question.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if is_hebrew_text(text) {
            Self::Hebrew
        } else {
            Self::English
        }
    }

    /// Picks the variant of a fixed message for this language.
    #[must_use]
    pub const fn pick<'a>(self, hebrew: &'a str, english: &'a str) -> &'a str {
        match self {
            Self::Hebrew => hebrew,
            Self::English => english,
        }
    }
}

/// True if `text` contains any character in U+0590..=U+05FF.
#[must_use]
pub fn is_hebrew_text(text: &str) -> bool {
    text.chars().any(|c| matches!(c, '\u{0590}'..='\u{05FF}'))
}
