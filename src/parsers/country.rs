//! Country extraction from free text.
//!
//! One bilingual alias table maps localized names and spellings to a canonical
//! English country name, which is what the `suppliers.country` column stores.

use super::ends_hebrew_word;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// (alias, canonical name). Aliases are lower-case.
const COUNTRY_ALIASES: &[(&str, &str)] = &[
    // Hebrew
    ("סין", "China"),
    ("גרמניה", "Germany"),
    ("ארה\"ב", "USA"),
    ("ארה״ב", "USA"),
    ("ארה''ב", "USA"),
    ("ארהב", "USA"),
    ("אמריקה", "USA"),
    ("איטליה", "Italy"),
    ("ספרד", "Spain"),
    ("רוסיה", "Russia"),
    ("יפן", "Japan"),
    ("קוריאה", "Korea"),
    ("הודו", "India"),
    ("ברזיל", "Brazil"),
    ("צרפת", "France"),
    ("בריטניה", "UK"),
    ("אנגליה", "UK"),
    ("הולנד", "Netherlands"),
    ("בלגיה", "Belgium"),
    ("שוויץ", "Switzerland"),
    ("שווייץ", "Switzerland"),
    ("אוסטריה", "Austria"),
    ("אוסטרליה", "Australia"),
    ("פולין", "Poland"),
    ("קנדה", "Canada"),
    ("תאילנד", "Thailand"),
    ("וייטנאם", "Vietnam"),
    // English
    ("china", "China"),
    ("germany", "Germany"),
    ("usa", "USA"),
    ("united states", "USA"),
    ("america", "USA"),
    ("italy", "Italy"),
    ("spain", "Spain"),
    ("russia", "Russia"),
    ("japan", "Japan"),
    ("korea", "Korea"),
    ("india", "India"),
    ("brazil", "Brazil"),
    ("france", "France"),
    ("uk", "UK"),
    ("united kingdom", "UK"),
    ("britain", "UK"),
    ("england", "UK"),
    ("netherlands", "Netherlands"),
    ("holland", "Netherlands"),
    ("belgium", "Belgium"),
    ("switzerland", "Switzerland"),
    ("austria", "Austria"),
    ("australia", "Australia"),
    ("poland", "Poland"),
    ("canada", "Canada"),
    ("thailand", "Thailand"),
    ("vietnam", "Vietnam"),
];

/// Alternation of every alias, longest first so that "united kingdom" wins
/// over "united" style prefixes and "אוסטרליה" is not read as "אוסטריה".
/// English aliases are anchored on word boundaries; Hebrew ones may carry
/// attached prefixes and are end-checked by [`ends_hebrew_word`].
static COUNTRY_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let mut aliases: Vec<&str> = COUNTRY_ALIASES.iter().map(|(alias, _)| *alias).collect();
    aliases.sort_by_key(|alias| std::cmp::Reverse(alias.chars().count()));

    let alternatives: Vec<String> = aliases
        .iter()
        .map(|alias| {
            if alias.is_ascii() {
                format!(r"\b{}\b", regex::escape(alias))
            } else {
                regex::escape(alias)
            }
        })
        .collect();

    Regex::new(&format!("(?i){}", alternatives.join("|"))).ok()
});

fn canonical_name(alias: &str) -> Option<&'static str> {
    COUNTRY_ALIASES
        .iter()
        .find(|(candidate, _)| *candidate == alias)
        .map(|(_, canonical)| *canonical)
}

/// Returns every distinct country mentioned in `question`, in the order
/// they first appear.
#[must_use]
pub fn extract_countries(question: &str) -> Vec<String> {
    let Some(re) = COUNTRY_RE.as_ref() else {
        return Vec::new();
    };

    let lower = question.to_lowercase();
    let mut found: Vec<String> = Vec::new();

    for m in re.find_iter(&lower) {
        if !m.as_str().is_ascii() && !ends_hebrew_word(&lower, m.end()) {
            continue;
        }
        if let Some(canonical) = canonical_name(m.as_str()) {
            if !found.iter().any(|c| c == canonical) {
                found.push(canonical.to_string());
            }
        }
    }

    debug!("Found countries {:?} in question: {}", found, question);
    found
}

/// Returns the first country mentioned in `question`.
#[must_use]
pub fn extract_country(question: &str) -> Option<String> {
    extract_countries(question).into_iter().next()
}
