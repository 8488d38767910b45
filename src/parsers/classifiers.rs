//! Question classifiers.
//!
//! Each classifier is an independent boolean predicate over one bilingual
//! regex table. All tables are case-insensitive and compiled once.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

const EXPIRY_PATTERNS: &[&str] = &[
    r"תוקף.*רישיון",
    r"רישיון.*תוקף",
    r"פג.*תוקף",
    r"תוקף.*פג",
    r"רישיון.*פג",
    r"פג.*רישיון",
    r"רישיונות.*מסתיימ",
    r"רישיון.*מסתיים",
    r"מתי.*פג",
    r"איזה.*פג",
    r"לאיזה.*פג",
    r"לאיזה.*תוקף",
    r"licen[cs]e.*expir",
    r"import.*expir",
    r"expir.*licen[cs]e",
];

const ORDER_PATTERNS: &[&str] = &[r"הזמנ", r"order", r"ORD-", r"סטטוס", r"status"];

const ORDER_COUNT_PATTERNS: &[&str] = &[
    r"כמה הזמנות",
    r"מספר הזמנות",
    r"מספר ההזמנות",
    r"how many orders",
    r"how many .*orders",
    r"count.*orders",
    r"number of orders",
];

const ORDER_STATUS_PATTERNS: &[&str] = &[
    r"הזמנות.*בסטטוס",
    r"בסטטוס.*הזמנות",
    r"הזמנות.*סטטוס",
    r"סטטוס.*הזמנות",
    r"אילו הזמנות",
    r"איזה הזמנות",
    r"הזמנות.*בייצור",
    r"הזמנות.*נשלח",
    r"הזמנות.*במכס",
    r"הזמנות.*הושלם",
    r"orders.*status",
    r"status.*orders?",
    r"which.*orders",
    r"what.*orders",
    r"ORD-\d{4}-\d{3}",
    r"בייצור",
    r"נשלח",
    r"במכס",
    r"הושלם",
    r"production",
    r"shipped",
    r"customs",
    r"completed",
];

const FINANCIAL_PATTERNS: &[&str] = &[
    r"סכום",
    r"כסף",
    r"שווי",
    r"ערך",
    r"כספי",
    r"מחיר",
    r"עלות",
    r"ממוצע",
    r"סה״כ",
    r#"סה"כ"#,
    r"סהכ",
    r"כולל",
    r"total.*amount",
    r"\bsum\b",
    r"money",
    r"\bcost",
    r"value",
    r"average",
    r"financial",
    r"price",
    r"what.*total",
    r"how much",
];

const COUNT_PATTERNS: &[&str] = &[r"כמה", r"מספר", r"how many", r"\bcount", r"number of"];

const SUPPLIER_PATTERNS: &[&str] = &[r"ספקים", r"ספק", r"supplier", r"vendor"];

const PAYMENT_PATTERNS: &[&str] = &[
    r"תשלום",
    r"תשלומים",
    r"לשלם",
    r"מקדמה",
    r"מקדמות",
    r"payment",
    r"\bpay\b",
];

const ADVANCE_PATTERNS: &[&str] = &[r"מקדמ", r"advance", r"up.?front", r"prepay"];

const OUT_OF_SCOPE_PATTERNS: &[&str] = &[r"מזג.*אוויר", r"weather", r"בדיחה", r"joke"];

/// Compiles a pattern table, case-insensitively. A pattern that fails to
/// compile is logged and skipped.
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| {
            Regex::new(&format!("(?i){pattern}"))
                .inspect_err(|e| warn!("Skipping invalid classifier pattern {pattern:?}: {e}"))
                .ok()
        })
        .collect()
}

static EXPIRY: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(EXPIRY_PATTERNS));
static ORDER: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(ORDER_PATTERNS));
static ORDER_COUNT: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(ORDER_COUNT_PATTERNS));
static ORDER_STATUS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(ORDER_STATUS_PATTERNS));
static FINANCIAL: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(FINANCIAL_PATTERNS));
static COUNT: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(COUNT_PATTERNS));
static SUPPLIER: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(SUPPLIER_PATTERNS));
static PAYMENT: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(PAYMENT_PATTERNS));
static ADVANCE: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(ADVANCE_PATTERNS));
static OUT_OF_SCOPE: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(OUT_OF_SCOPE_PATTERNS));

fn any_match(table: &[Regex], text: &str) -> bool {
    table.iter().any(|re| re.is_match(text))
}

/// Is the question about import/feed license expiry?
#[must_use]
pub fn is_expiry_question(text: &str) -> bool {
    any_match(&EXPIRY, text)
}

/// Does the question mention orders at all?
#[must_use]
pub fn is_order_question(text: &str) -> bool {
    any_match(&ORDER, text)
}

/// Is the question asking how many orders there are?
#[must_use]
pub fn is_order_count_question(text: &str) -> bool {
    any_match(&ORDER_COUNT, text)
}

/// Is the question about the status of orders, or of one order?
#[must_use]
pub fn is_order_status_question(text: &str) -> bool {
    any_match(&ORDER_STATUS, text)
}

/// Is the question about amounts, totals or averages?
#[must_use]
pub fn is_financial_question(text: &str) -> bool {
    any_match(&FINANCIAL, text)
}

/// Is the question asking for a count?
#[must_use]
pub fn is_count_question(text: &str) -> bool {
    any_match(&COUNT, text)
}

/// Does the question mention suppliers?
#[must_use]
pub fn is_supplier_question(text: &str) -> bool {
    any_match(&SUPPLIER, text)
}

/// Is the question about scheduled payments?
#[must_use]
pub fn is_payment_question(text: &str) -> bool {
    any_match(&PAYMENT, text)
}

/// Does the question mention advance (up-front) payments?
#[must_use]
pub fn is_advance_question(text: &str) -> bool {
    any_match(&ADVANCE, text)
}

/// Small talk the bot does not handle (weather, jokes).
#[must_use]
pub fn is_out_of_scope_question(text: &str) -> bool {
    any_match(&OUT_OF_SCOPE, text)
}
