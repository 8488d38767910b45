//! Payment schedule answers.

use super::{format_amount, format_date};
use crate::{
    core::payment::{
        ADVANCE_PAYMENT_PHASE, FINAL_PAYMENT_PHASE, PaymentDue, get_payment_phases_between,
        get_payment_phases_for_order,
    },
    errors::Result,
    parsers::{Language, MonthRange},
};
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use tracing::info;

fn phase_label(lang: Language, phase_name: &str) -> &str {
    match (lang, phase_name) {
        (Language::English, ADVANCE_PAYMENT_PHASE) => "Advance payment",
        (Language::English, FINAL_PAYMENT_PHASE) => "Final payment",
        _ => phase_name,
    }
}

fn amount_text(payment: &PaymentDue) -> String {
    payment.amount.map_or_else(
        || "-".to_string(),
        |amount| format!("{} {}", format_amount(amount), payment.currency),
    )
}

/// Payments due within `range`, or every payment of one order.
pub async fn payment_schedule(
    db: &DatabaseConnection,
    lang: Language,
    order_number: Option<&str>,
    range: &MonthRange,
) -> Result<String> {
    match order_number {
        Some(number) => order_schedule(db, lang, number).await,
        None => payments_in_range(db, lang, range).await,
    }
}

async fn payments_in_range(
    db: &DatabaseConnection,
    lang: Language,
    range: &MonthRange,
) -> Result<String> {
    let payments = get_payment_phases_between(db, range.start, range.end).await?;
    info!(
        "Found {} payments due {} .. {}",
        payments.len(),
        range.start,
        range.end
    );

    if payments.is_empty() {
        return Ok(lang
            .pick(
                "אין תשלומים לתשלום בתקופה זו.",
                "No payments are due in this period.",
            )
            .to_string());
    }

    let (from, to) = (format_date(lang, range.start), format_date(lang, range.end));
    let mut reply = match lang {
        Language::Hebrew => format!("{} תשלומים לתשלום בין {from} ל-{to}:", payments.len()),
        Language::English => format!("{} payments due between {from} and {to}:", payments.len()),
    };
    for payment in &payments {
        write!(
            reply,
            "\n- {}: {} {} ({}) - {}",
            format_date(lang, payment.due_date),
            phase_label(lang, &payment.phase_name),
            payment.order_number,
            payment.supplier_name,
            amount_text(payment)
        )?;
    }
    Ok(reply)
}

async fn order_schedule(db: &DatabaseConnection, lang: Language, number: &str) -> Result<String> {
    let Some(payments) = get_payment_phases_for_order(db, number).await? else {
        return Ok(match lang {
            Language::Hebrew => format!("לא נמצאה הזמנה עם מספר {number}"),
            Language::English => format!("No order found with number {number}"),
        });
    };

    if payments.is_empty() {
        return Ok(match lang {
            Language::Hebrew => format!("אין תשלומים מתוכננים להזמנה {number}"),
            Language::English => format!("No payments are planned for order {number}"),
        });
    }

    let mut reply = match lang {
        Language::Hebrew => format!("לוח תשלומים להזמנה {number}:"),
        Language::English => format!("Payment schedule for order {number}:"),
    };
    for payment in &payments {
        write!(
            reply,
            "\n- {}: {} - {}",
            format_date(lang, payment.due_date),
            phase_label(lang, &payment.phase_name),
            amount_text(payment)
        )?;
    }
    Ok(reply)
}
