//! Order answers - details, counts, status lists, totals and recent orders.

use super::{display_status, format_amount, format_date};
use crate::{
    core::order::{
        self as orders, OrderDetails, count_orders, get_order_by_number, get_orders_by_status,
        get_recent_orders,
    },
    entities::{order, supplier},
    errors::Result,
    parsers::{Language, StatusFilter},
};
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use tracing::info;

fn supplier_label(supplier: Option<&supplier::Model>) -> String {
    supplier.map_or_else(
        || "-".to_string(),
        |s| format!("{} ({})", s.name, s.country),
    )
}

fn status_label(lang: Language, filter: StatusFilter) -> &'static str {
    lang.pick(filter.label(), filter.english_label())
}

/// Details of one order, or a "not found" sentence.
pub async fn order_details(
    db: &DatabaseConnection,
    lang: Language,
    order_number: &str,
) -> Result<String> {
    let Some(details) = get_order_by_number(db, order_number).await? else {
        info!("Order {order_number} not found");
        return Ok(match lang {
            Language::Hebrew => format!("לא נמצאה הזמנה עם מספר {order_number}"),
            Language::English => format!("No order found with number {order_number}"),
        });
    };
    render_details(lang, &details)
}

fn render_details(lang: Language, details: &OrderDetails) -> Result<String> {
    let OrderDetails {
        order,
        supplier,
        customs_company,
        customs_agent,
    } = details;

    let mut reply = String::new();
    writeln!(
        reply,
        "{} {}:",
        lang.pick("הזמנה", "Order"),
        order.order_number
    )?;
    writeln!(
        reply,
        "{}: {}",
        lang.pick("ספק", "Supplier"),
        supplier_label(Some(supplier))
    )?;
    writeln!(
        reply,
        "{}: {}",
        lang.pick("סטטוס", "Status"),
        display_status(lang, &order.status)
    )?;
    writeln!(
        reply,
        "{}: {} {}",
        lang.pick("סכום", "Amount"),
        format_amount(order.total_amount),
        order.original_currency
    )?;
    write!(
        reply,
        "{}: {}",
        lang.pick("תאריך משלוח צפוי", "Expected delivery"),
        format_date(lang, order.eta_final)
    )?;

    if let Some(container) = &order.container_number {
        write!(reply, "\n{}: {container}", lang.pick("מכולה", "Container"))?;
    }
    if let Some(notes) = &order.notes {
        write!(reply, "\n{}: {notes}", lang.pick("הערות", "Notes"))?;
    }
    if let Some(company) = customs_company {
        write!(
            reply,
            "\n{}: {}",
            lang.pick("עמיל מכס", "Customs broker"),
            company.name
        )?;
        if let Some(agent) = customs_agent {
            write!(reply, " ({}", agent.name)?;
            if let Some(phone) = &agent.phone {
                write!(reply, ", {phone}")?;
            }
            reply.push(')');
        }
    }
    Ok(reply)
}

/// Counts orders: open ones, ones in a status, or all with the open share.
pub async fn order_count(
    db: &DatabaseConnection,
    lang: Language,
    status: Option<StatusFilter>,
) -> Result<String> {
    let reply = match status {
        Some(StatusFilter::Open) => {
            let count = count_orders(db, Some(StatusFilter::Open)).await?;
            match lang {
                Language::Hebrew => format!("יש לנו {count} הזמנות פתוחות (שלא הושלמו)"),
                Language::English => format!("We have {count} open orders (not completed)"),
            }
        }
        Some(filter) => {
            let count = count_orders(db, Some(filter)).await?;
            let label = status_label(lang, filter);
            match lang {
                Language::Hebrew => format!("יש לנו {count} הזמנות בסטטוס \"{label}\""),
                Language::English => format!("We have {count} orders with status \"{label}\""),
            }
        }
        None => {
            let total = count_orders(db, None).await?;
            let open = count_orders(db, Some(StatusFilter::Open)).await?;
            match lang {
                Language::Hebrew => format!("יש לנו סה\"כ {total} הזמנות, מתוכן {open} פתוחות"),
                Language::English => {
                    format!("We have {total} orders in total, {open} of them open")
                }
            }
        }
    };
    info!("Order count answer for {status:?}: {reply}");
    Ok(reply)
}

/// Lists up to 20 orders matching `status`.
pub async fn orders_by_status(
    db: &DatabaseConnection,
    lang: Language,
    status: StatusFilter,
) -> Result<String> {
    let found = get_orders_by_status(db, status).await?;
    let label = status_label(lang, status);
    info!("Found {} orders with status {label}", found.len());

    if found.is_empty() {
        return Ok(match lang {
            Language::Hebrew => format!("לא נמצאו הזמנות בסטטוס \"{label}\""),
            Language::English => format!("No orders found with status \"{label}\""),
        });
    }

    let mut reply = match lang {
        Language::Hebrew => format!("נמצאו {} הזמנות בסטטוס \"{label}\":\n", found.len()),
        Language::English => format!("Found {} orders with status \"{label}\":\n", found.len()),
    };
    for (order, supplier) in &found {
        write!(
            reply,
            "\n{} - {}\n   {}: {} {}\n   {}: {}\n",
            order.order_number,
            supplier_label(supplier.as_ref()),
            lang.pick("סכום", "Amount"),
            format_amount(order.total_amount),
            order.original_currency,
            lang.pick("תאריך משלוח", "Delivery date"),
            format_date(lang, order.eta_final)
        )?;
    }
    Ok(reply.trim_end().to_string())
}

/// Total value, average and open-order figures.
pub async fn order_financials(db: &DatabaseConnection, lang: Language) -> Result<String> {
    let figures = orders::order_financials(db).await?;
    let total = format_amount(figures.total_value);
    let average = format_amount(figures.average_value.round());
    let open_value = format_amount(figures.open_value);

    Ok(match lang {
        Language::Hebrew => format!(
            "סיכום כספי של הזמנות:\n\n\
             סה\"כ ערך כל ההזמנות: {total}\n\
             ממוצע הזמנה: {average}\n\
             מספר הזמנות: {}\n\n\
             הזמנות פתוחות: {}\n\
             ערך הזמנות פתוחות: {open_value}\n\n\
             הערה: סכומים במטבעות מעורבים",
            figures.order_count, figures.open_count
        ),
        Language::English => format!(
            "Order financial summary:\n\n\
             Total value of all orders: {total}\n\
             Average order: {average}\n\
             Number of orders: {}\n\n\
             Open orders: {}\n\
             Value of open orders: {open_value}\n\n\
             Note: amounts are in mixed currencies",
            figures.order_count, figures.open_count
        ),
    })
}

fn render_recent(lang: Language, recent: &[(order::Model, Option<supplier::Model>)]) -> Result<String> {
    let mut reply = match lang {
        Language::Hebrew => format!("{} ההזמנות האחרונות:\n", recent.len()),
        Language::English => format!("The {} most recent orders:\n", recent.len()),
    };
    for (order, supplier) in recent {
        write!(
            reply,
            "\n{} - {}\n{}: {} | {} {}\n",
            order.order_number,
            supplier_label(supplier.as_ref()),
            lang.pick("סטטוס", "Status"),
            display_status(lang, &order.status),
            format_amount(order.total_amount),
            order.original_currency
        )?;
    }
    Ok(reply.trim_end().to_string())
}

/// The five most recently created orders.
pub async fn recent_orders(db: &DatabaseConnection, lang: Language) -> Result<String> {
    let recent = get_recent_orders(db).await?;
    if recent.is_empty() {
        return Ok(lang
            .pick("אין עדיין הזמנות במערכת.", "There are no orders yet.")
            .to_string());
    }
    render_recent(lang, &recent)
}
