//! Question router - turns a free-text question into one [`Intent`].
//!
//! Classifiers are applied in a single fixed priority order:
//! license expiry, suppliers taking an advance, payments, orders, financial
//! totals, suppliers by country, small talk, and finally "not understood".

use crate::parsers::{
    Language, MonthRange, StatusFilter,
    classifiers::{
        is_advance_question, is_count_question, is_expiry_question, is_financial_question, is_order_count_question,
        is_order_question, is_order_status_question, is_out_of_scope_question,
        is_payment_question, is_supplier_question,
    },
    extract_countries, extract_month_range_at, extract_order_number, extract_order_status,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

/// The classified purpose of a question, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Suppliers whose import license expires within the range
    LicenseExpiry {
        /// Expiry window
        range: MonthRange,
    },
    /// Payment milestones due within the range, or of one order
    PaymentSchedule {
        /// Restrict to this order
        order_number: Option<String>,
        /// Due-date window, ignored when an order number is given
        range: MonthRange,
    },
    /// Details of one order
    OrderDetails {
        /// Canonical `ORD-YYYY-NNN` number
        order_number: String,
    },
    /// Number of orders, optionally in a status
    OrderCount {
        /// Status filter, `None` counts every order
        status: Option<StatusFilter>,
    },
    /// Orders matching a status filter
    OrdersByStatus {
        /// Status filter
        status: StatusFilter,
    },
    /// Totals and averages over order amounts
    OrderFinancials,
    /// The most recently created orders
    RecentOrders,
    /// Number of suppliers per country, or in total when `countries` is empty
    SupplierCount {
        /// Canonical country names
        countries: Vec<String>,
    },
    /// Suppliers located in one country
    SuppliersByCountry {
        /// Canonical country name
        country: String,
    },
    /// Suppliers that require an advance payment
    AdvancePaymentSuppliers,
    /// Small talk outside the bot's domain
    OutOfScope,
    /// Nothing matched
    Unrecognized,
}

impl Intent {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LicenseExpiry { .. } => "license_expiry",
            Self::PaymentSchedule { .. } => "payment_schedule",
            Self::OrderDetails { .. } => "order_details",
            Self::OrderCount { .. } => "order_count",
            Self::OrdersByStatus { .. } => "orders_by_status",
            Self::OrderFinancials => "order_financials",
            Self::RecentOrders => "recent_orders",
            Self::SupplierCount { .. } => "supplier_count",
            Self::SuppliersByCountry { .. } => "suppliers_by_country",
            Self::AdvancePaymentSuppliers => "advance_payment_suppliers",
            Self::OutOfScope => "out_of_scope",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// A routing decision: what to answer and in which language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutedQuestion {
    /// Reply language
    pub language: Language,
    /// Classified intent
    #[serde(flatten)]
    pub intent: Intent,
}

/// Routes `question` relative to `now` (used for month ranges).
#[must_use]
pub fn route_question(question: &str, now: NaiveDateTime) -> RoutedQuestion {
    let language = Language::detect(question);
    let intent = classify(question, now);
    info!(
        "Routed question as {} ({:?}): {}",
        intent.name(),
        language,
        question
    );
    RoutedQuestion { language, intent }
}

fn classify(question: &str, now: NaiveDateTime) -> Intent {
    if is_expiry_question(question) {
        return Intent::LicenseExpiry {
            range: extract_month_range_at(question, now),
        };
    }

    // "How many suppliers require advance payment?" is about suppliers,
    // not about a payment schedule.
    if is_supplier_question(question) && is_advance_question(question) {
        return Intent::AdvancePaymentSuppliers;
    }

    if is_payment_question(question) {
        return Intent::PaymentSchedule {
            order_number: extract_order_number(question),
            range: extract_month_range_at(question, now),
        };
    }

    if is_order_question(question) {
        return classify_order_question(question);
    }

    if is_financial_question(question) {
        return Intent::OrderFinancials;
    }

    if let Some(intent) = classify_supplier_question(question) {
        return intent;
    }

    if is_out_of_scope_question(question) {
        return Intent::OutOfScope;
    }

    Intent::Unrecognized
}

fn classify_order_question(question: &str) -> Intent {
    if is_order_status_question(question) {
        if let Some(order_number) = extract_order_number(question) {
            return Intent::OrderDetails { order_number };
        }
    }

    if is_order_count_question(question) {
        return Intent::OrderCount {
            status: extract_order_status(question),
        };
    }

    if is_financial_question(question) {
        return Intent::OrderFinancials;
    }

    if let Some(status) = extract_order_status(question) {
        return Intent::OrdersByStatus { status };
    }

    Intent::RecentOrders
}

fn classify_supplier_question(question: &str) -> Option<Intent> {
    let countries = extract_countries(question);
    let is_count = is_count_question(question);

    if is_count && !countries.is_empty() {
        return Some(Intent::SupplierCount { countries });
    }

    if is_count && is_supplier_question(question) {
        return Some(Intent::SupplierCount {
            countries: Vec::new(),
        });
    }

    countries
        .into_iter()
        .next()
        .map(|country| Intent::SuppliersByCountry { country })
}
