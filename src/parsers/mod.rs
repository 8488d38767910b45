//! Question parsing - bilingual entity extractors and intent classifiers.
//!
//! Everything here is pure and best-effort: a miss yields `None`, an empty
//! list or `false`, never an error. Regex tables are compiled once on first
//! use.

/// Boolean question classifiers
pub mod classifiers;
/// Country name extraction
pub mod country;
/// Hebrew / English detection
pub mod language;
/// Month and date range extraction
pub mod month_range;
/// `ORD-YYYY-NNN` order number extraction
pub mod order_number;
/// Order status extraction and the canonical status set
pub mod status;

pub use country::{extract_countries, extract_country};
pub use language::Language;
pub use month_range::{MonthRange, extract_month_range, extract_month_range_at};
pub use order_number::extract_order_number;
pub use status::{OrderStatus, StatusFilter, extract_order_status};

/// Letters of the Hebrew alphabet, final forms included.
const fn is_hebrew_letter(c: char) -> bool {
    matches!(c, '\u{05D0}'..='\u{05EA}')
}

/// True when the Hebrew word matched up to byte offset `end` is not the
/// prefix of a longer word ("סין" in "בסין" but not in "סינית").
///
/// Hebrew attaches prepositions to the front of a word, so matches are
/// allowed to start mid-word; only the end is checked.
pub(crate) fn ends_hebrew_word(text: &str, end: usize) -> bool {
    text.get(end..)
        .and_then(|rest| rest.chars().next())
        .is_none_or(|c| !is_hebrew_letter(c))
}
