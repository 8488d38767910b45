//! Domain handlers - run the query behind an [`Intent`] and render the reply.
//!
//! Every reply is rendered in the language the question was asked in.
//! Errors propagate to the caller, which turns them into
//! [`failure_message`] for the intent.

pub mod license;
pub mod order;
pub mod payment;
pub mod supplier;

use crate::{
    errors::Result,
    llm::SupplierSummarizer,
    parsers::{Language, OrderStatus},
    router::{Intent, RoutedQuestion},
};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

/// The outcome of answering a routed question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A normal answer
    Answer(String),
    /// The question was about something the bot does not cover
    OutOfScope(String),
    /// The question could not be classified
    NotUnderstood(String),
}

/// Answers a routed question.
pub async fn answer(
    db: &DatabaseConnection,
    summarizer: Option<&dyn SupplierSummarizer>,
    question: &str,
    routed: &RoutedQuestion,
) -> Result<Reply> {
    let lang = routed.language;
    let text = match &routed.intent {
        Intent::LicenseExpiry { range } => license::expiring_licenses(db, lang, range).await?,
        Intent::PaymentSchedule {
            order_number,
            range,
        } => payment::payment_schedule(db, lang, order_number.as_deref(), range).await?,
        Intent::OrderDetails { order_number } => {
            order::order_details(db, lang, order_number).await?
        }
        Intent::OrderCount { status } => order::order_count(db, lang, *status).await?,
        Intent::OrdersByStatus { status } => order::orders_by_status(db, lang, *status).await?,
        Intent::OrderFinancials => order::order_financials(db, lang).await?,
        Intent::RecentOrders => order::recent_orders(db, lang).await?,
        Intent::SupplierCount { countries } => {
            supplier::supplier_count(db, lang, countries).await?
        }
        Intent::SuppliersByCountry { country } => {
            supplier::suppliers_by_country(db, summarizer, question, lang, country).await?
        }
        Intent::AdvancePaymentSuppliers => supplier::advance_payment_suppliers(db, lang).await?,
        Intent::OutOfScope => return Ok(Reply::OutOfScope(out_of_scope_message(lang).to_string())),
        Intent::Unrecognized => {
            return Ok(Reply::NotUnderstood(not_understood_message(lang).to_string()));
        }
    };
    Ok(Reply::Answer(text))
}

/// Localized message for a question that matched nothing.
#[must_use]
pub const fn not_understood_message(lang: Language) -> &'static str {
    lang.pick(
        "לא הצלחתי להבין את השאלה. אני יכול לעזור עם שאלות על ספקים, הזמנות ורישיונות.",
        "I couldn't understand the question. I can help with questions about suppliers, orders, and licenses.",
    )
}

/// Localized message for small talk.
#[must_use]
pub const fn out_of_scope_message(lang: Language) -> &'static str {
    lang.pick(
        "אני יכול לעזור רק בשאלות על ספקים, הזמנות ורישיונות.",
        "I can only help with questions about suppliers, orders, and licenses.",
    )
}

/// Localized message shown when answering `intent` failed.
#[must_use]
pub const fn failure_message(intent: &Intent, lang: Language) -> &'static str {
    match intent {
        Intent::LicenseExpiry { .. } => lang.pick(
            "שגיאה בבדיקת תוקף רישיונות",
            "Error checking license expiry",
        ),
        Intent::PaymentSchedule { .. } => lang.pick(
            "שגיאה בשליפת לוח התשלומים",
            "Error fetching the payment schedule",
        ),
        Intent::OrderDetails { .. } => lang.pick("שגיאה בשליפת הזמנה", "Error fetching the order"),
        Intent::OrderCount { .. } => lang.pick("שגיאה בספירת הזמנות", "Error counting orders"),
        Intent::OrdersByStatus { .. } | Intent::RecentOrders => {
            lang.pick("שגיאה בשליפת הזמנות", "Error fetching orders")
        }
        Intent::OrderFinancials => lang.pick(
            "שגיאה בחישוב נתונים כספיים",
            "Error calculating financial data",
        ),
        Intent::SupplierCount { .. } => lang.pick("שגיאה בספירת ספקים", "Error counting suppliers"),
        Intent::SuppliersByCountry { .. } | Intent::AdvancePaymentSuppliers => {
            lang.pick("שגיאה בשליפת ספקים", "Error fetching suppliers")
        }
        Intent::OutOfScope | Intent::Unrecognized => {
            lang.pick("שגיאה כללית בשרת", "General server error")
        }
    }
}

/// `15.12.2025` in Hebrew replies, `2025-12-15` in English ones.
#[must_use]
pub fn format_date(lang: Language, moment: NaiveDateTime) -> String {
    let pattern = lang.pick("%-d.%-m.%Y", "%Y-%m-%d");
    moment.format(pattern).to_string()
}

/// Formats an amount with thousands separators; whole amounts have no
/// decimals.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && (whole != "0" || fraction != "00") {
        "-"
    } else {
        ""
    };
    if fraction == "00" {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// A stored status in the reply language; unknown strings are shown as stored.
#[must_use]
pub fn display_status(lang: Language, status: &str) -> String {
    match (lang, OrderStatus::from_canonical(status)) {
        (Language::English, Some(known)) => known.english_label().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{router::route_question, test_utils::*};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(50_000.0), "50,000");
        assert_eq!(format_amount(1_234_567.5), "1,234,567.50");
        assert_eq!(format_amount(-2500.0), "-2,500");
    }

    #[test]
    fn test_format_date() {
        let moment = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(format_date(Language::Hebrew, moment), "5.3.2025");
        assert_eq!(format_date(Language::English, moment), "2025-03-05");
    }

    #[test]
    fn test_display_status() {
        assert_eq!(display_status(Language::English, "במכס"), "in customs");
        assert_eq!(display_status(Language::Hebrew, "במכס"), "במכס");
        assert_eq!(display_status(Language::English, "legacy"), "legacy");
    }

    #[tokio::test]
    async fn test_answer_out_of_scope_and_unrecognized() -> Result<()> {
        let db = setup_test_db().await?;

        let question = "מה מזג האוויר היום?";
        let reply = answer(&db, None, question, &route_question(question, now())).await?;
        assert!(matches!(reply, Reply::OutOfScope(_)));

        let question = "blah blah";
        let reply = answer(&db, None, question, &route_question(question, now())).await?;
        assert_eq!(
            reply,
            Reply::NotUnderstood(not_understood_message(Language::English).to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_answer_dispatches_to_handler() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_supplier(&db, "Shanghai Pets", "China").await?;

        let question = "כמה ספקים יש בסין?";
        let reply = answer(&db, None, question, &route_question(question, now())).await?;
        assert_eq!(reply, Reply::Answer("יש 1 ספקים במדינה China.".to_string()));
        Ok(())
    }

    #[test]
    fn test_failure_messages_are_localized() {
        let intent = Intent::OrderFinancials;
        assert_eq!(
            failure_message(&intent, Language::Hebrew),
            "שגיאה בחישוב נתונים כספיים"
        );
        assert_eq!(
            failure_message(&intent, Language::English),
            "Error calculating financial data"
        );
    }
}
