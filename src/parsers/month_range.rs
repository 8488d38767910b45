//! Month and date range extraction for license-expiry and payment questions.
//!
//! Recognized forms, in priority order:
//! 1. "from today until <month> [year]" / "מהיום ועד <month> [year]"
//! 2. "<month> <year>" with a 2- or 4-digit year ("דצמבר 25", "March 2026")
//! 3. a bare month name
//! 4. nothing, which means the current month
//!
//! A month without a year that is already behind us this year refers to next
//! year. Ranges always end at 23:59:59 on the last day of the month.

use super::ends_hebrew_word;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

/// (name, month number 1-12). Lower-case.
const MONTH_NAMES: &[(&str, u32)] = &[
    ("ינואר", 1),
    ("פברואר", 2),
    ("מרץ", 3),
    ("מרס", 3),
    ("אפריל", 4),
    ("מאי", 5),
    ("יוני", 6),
    ("יולי", 7),
    ("אוגוסט", 8),
    ("ספטמבר", 9),
    ("אוקטובר", 10),
    ("נובמבר", 11),
    ("דצמבר", 12),
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

static MONTH_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let mut names: Vec<&str> = MONTH_NAMES.iter().map(|(name, _)| *name).collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.chars().count()));

    let alternatives: Vec<String> = names
        .iter()
        .map(|name| {
            if name.is_ascii() {
                format!(r"\b{name}\b")
            } else {
                (*name).to_string()
            }
        })
        .collect();

    Regex::new(&format!("(?i){}", alternatives.join("|"))).ok()
});

/// Year directly after a month name, optionally separated by spaces, commas,
/// slashes, dashes or an apostrophe ("דצמבר '25").
static YEAR_AFTER_MONTH_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[\s,/'’-]*(\d{4}|\d{2})\b").ok());

/// "from today ... until" in either language; the month must follow it.
static TODAY_UNTIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:מהיום|from\s+today|from\s+now).*?(?:עד|until|till|through|\bto\b)").ok()
});

/// A concrete date range with the month it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    /// Inclusive start
    pub start: NaiveDateTime,
    /// Inclusive end, 23:59:59 on the last day of the month
    pub end: NaiveDateTime,
    /// Year of the named (or current) month
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
}

impl MonthRange {
    /// The whole calendar month. `None` for an invalid month or year.
    #[must_use]
    pub fn whole_month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?.and_time(NaiveTime::MIN);
        Some(Self {
            start,
            end: month_end(year, month)?,
            year,
            month,
        })
    }

    /// From `now` until the end of the given month.
    #[must_use]
    pub fn until_month_end(now: NaiveDateTime, year: i32, month: u32) -> Option<Self> {
        Some(Self {
            start: now,
            end: month_end(year, month)?,
            year,
            month,
        })
    }

    /// True if `moment` falls within the range, both ends inclusive.
    #[must_use]
    pub fn contains(&self, moment: NaiveDateTime) -> bool {
        self.start <= moment && moment <= self.end
    }
}

/// 23:59:59 on the last day of the month.
fn month_end(year: i32, month: u32) -> Option<NaiveDateTime> {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    next_month_first
        .pred_opt()?
        .and_hms_opt(23, 59, 59)
}

struct MonthMention {
    month: u32,
    /// Byte offset just past the month name
    end: usize,
}

fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, month)| *month)
}

/// Every month mentioned in `lower`, skipping Hebrew words that merely start
/// with a month name ("מאיפה" is not May).
fn month_mentions(lower: &str) -> Vec<MonthMention> {
    let Some(re) = MONTH_RE.as_ref() else {
        return Vec::new();
    };
    re.find_iter(lower)
        .filter(|m| m.as_str().is_ascii() || ends_hebrew_word(lower, m.end()))
        .filter_map(|m| {
            month_number(m.as_str()).map(|month| MonthMention {
                month,
                end: m.end(),
            })
        })
        .collect()
}

fn year_after(lower: &str, offset: usize) -> Option<i32> {
    let rest = lower.get(offset..)?;
    let digits = YEAR_AFTER_MONTH_RE.as_ref()?.captures(rest)?.get(1)?.as_str();
    let value: i32 = digits.parse().ok()?;
    Some(if digits.len() == 2 { 2000 + value } else { value })
}

/// Next occurrence of `month`: this year unless the month is already past.
fn infer_year(month: u32, now: NaiveDateTime) -> i32 {
    if month < now.month() {
        now.year() + 1
    } else {
        now.year()
    }
}

/// Extracts a month range relative to the current local time.
#[must_use]
pub fn extract_month_range(question: &str) -> MonthRange {
    extract_month_range_at(question, Local::now().naive_local())
}

/// Extracts a month range relative to `now`.
#[must_use]
pub fn extract_month_range_at(question: &str, now: NaiveDateTime) -> MonthRange {
    let lower = question.to_lowercase();

    if let Some(range) = today_until_range(&lower, now) {
        debug!("Today range: {} - {}", range.start, range.end);
        return range;
    }

    let mentions = month_mentions(&lower);

    if let Some(range) = mentions.iter().find_map(|mention| {
        year_after(&lower, mention.end)
            .and_then(|year| MonthRange::whole_month(year, mention.month))
    }) {
        debug!("Month/year range: {} - {}", range.start, range.end);
        return range;
    }

    if let Some(range) = mentions.first().and_then(|mention| {
        MonthRange::whole_month(infer_year(mention.month, now), mention.month)
    }) {
        debug!("Month only range: {} - {}", range.start, range.end);
        return range;
    }

    let range = current_month(now);
    debug!("Default range (current month): {} - {}", range.start, range.end);
    range
}

fn today_until_range(lower: &str, now: NaiveDateTime) -> Option<MonthRange> {
    let marker = TODAY_UNTIL_RE.as_ref()?.find(lower)?;
    let tail = lower.get(marker.end()..)?;
    let mention = month_mentions(tail).into_iter().next()?;
    let year = year_after(tail, mention.end).unwrap_or_else(|| infer_year(mention.month, now));
    MonthRange::until_month_end(now, year, mention.month)
}

fn current_month(now: NaiveDateTime) -> MonthRange {
    // The first of the month `now` is in always exists
    #[allow(clippy::expect_used)]
    let range = MonthRange::whole_month(now.year(), now.month())
        .expect("Current month is always a valid range");
    range
}
