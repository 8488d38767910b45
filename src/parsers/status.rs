//! Order status extraction and the canonical status set.
//!
//! Orders store their status as a Hebrew string. Every alias, Hebrew or
//! English, resolves to one [`OrderStatus`]; "open" resolves to
//! [`StatusFilter::Open`], meaning any status other than completed.

use serde::Serialize;
use tracing::debug;

/// Canonical order lifecycle stages, in lifecycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderStatus {
    /// בתהליך הזמנה
    Ordering,
    /// הזמנה נשלחה
    OrderSent,
    /// אושר על ידי ספק
    SupplierApproved,
    /// בייצור
    InProduction,
    /// נשלח
    Shipped,
    /// במכס
    InCustoms,
    /// שוחרר ממכס
    CustomsReleased,
    /// בדרך אלינו
    OnTheWay,
    /// הגיע למחסן
    ArrivedAtWarehouse,
    /// הושלם
    Completed,
}

impl OrderStatus {
    /// Every status in lifecycle order
    pub const ALL: [Self; 10] = [
        Self::Ordering,
        Self::OrderSent,
        Self::SupplierApproved,
        Self::InProduction,
        Self::Shipped,
        Self::InCustoms,
        Self::CustomsReleased,
        Self::OnTheWay,
        Self::ArrivedAtWarehouse,
        Self::Completed,
    ];

    /// The string stored in `orders.status`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordering => "בתהליך הזמנה",
            Self::OrderSent => "הזמנה נשלחה",
            Self::SupplierApproved => "אושר על ידי ספק",
            Self::InProduction => "בייצור",
            Self::Shipped => "נשלח",
            Self::InCustoms => "במכס",
            Self::CustomsReleased => "שוחרר ממכס",
            Self::OnTheWay => "בדרך אלינו",
            Self::ArrivedAtWarehouse => "הגיע למחסן",
            Self::Completed => "הושלם",
        }
    }

    /// English label used in English replies.
    #[must_use]
    pub const fn english_label(self) -> &'static str {
        match self {
            Self::Ordering => "ordering in progress",
            Self::OrderSent => "order sent",
            Self::SupplierApproved => "approved by supplier",
            Self::InProduction => "in production",
            Self::Shipped => "shipped",
            Self::InCustoms => "in customs",
            Self::CustomsReleased => "released from customs",
            Self::OnTheWay => "on the way",
            Self::ArrivedAtWarehouse => "arrived at warehouse",
            Self::Completed => "completed",
        }
    }

    /// Parses a stored canonical string.
    #[must_use]
    pub fn from_canonical(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value.trim())
    }
}

/// What an extracted status means for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusFilter {
    /// Every order that is not completed
    Open,
    /// Orders in exactly this status
    Exact(OrderStatus),
}

impl StatusFilter {
    /// Label shown in Hebrew replies; `פתוח` for [`StatusFilter::Open`].
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "פתוח",
            Self::Exact(status) => status.as_str(),
        }
    }

    /// Label shown in English replies.
    #[must_use]
    pub const fn english_label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Exact(status) => status.english_label(),
        }
    }

    /// Whether an order with the stored `status` passes this filter.
    #[must_use]
    pub fn matches(self, status: &str) -> bool {
        match self {
            Self::Open => status != OrderStatus::Completed.as_str(),
            Self::Exact(expected) => status == expected.as_str(),
        }
    }
}

/// Phrase table, checked in order. Multi-word phrases come first so the
/// whole phrase wins over any single word inside it.
const STATUS_PHRASES: &[(&str, StatusFilter)] = &[
    ("בתהליך הזמנה", StatusFilter::Exact(OrderStatus::Ordering)),
    ("הזמנה נשלחה", StatusFilter::Exact(OrderStatus::OrderSent)),
    ("אושר על ידי ספק", StatusFilter::Exact(OrderStatus::SupplierApproved)),
    ("שוחרר ממכס", StatusFilter::Exact(OrderStatus::CustomsReleased)),
    ("שוחרר מהמכס", StatusFilter::Exact(OrderStatus::CustomsReleased)),
    ("בדרך אלינו", StatusFilter::Exact(OrderStatus::OnTheWay)),
    ("הגיע למחסן", StatusFilter::Exact(OrderStatus::ArrivedAtWarehouse)),
    ("in progress", StatusFilter::Exact(OrderStatus::Ordering)),
    ("released from customs", StatusFilter::Exact(OrderStatus::CustomsReleased)),
    ("on the way", StatusFilter::Exact(OrderStatus::OnTheWay)),
    ("in transit", StatusFilter::Exact(OrderStatus::OnTheWay)),
    ("בתהליך", StatusFilter::Exact(OrderStatus::Ordering)),
    ("נשלחה", StatusFilter::Exact(OrderStatus::OrderSent)),
    ("אושר", StatusFilter::Exact(OrderStatus::SupplierApproved)),
    ("בייצור", StatusFilter::Exact(OrderStatus::InProduction)),
    ("ייצור", StatusFilter::Exact(OrderStatus::InProduction)),
    ("שוחרר", StatusFilter::Exact(OrderStatus::CustomsReleased)),
    ("במכס", StatusFilter::Exact(OrderStatus::InCustoms)),
    ("מכס", StatusFilter::Exact(OrderStatus::InCustoms)),
    ("נשלח", StatusFilter::Exact(OrderStatus::Shipped)),
    ("בדרך", StatusFilter::Exact(OrderStatus::OnTheWay)),
    ("הגיע", StatusFilter::Exact(OrderStatus::ArrivedAtWarehouse)),
    ("הושלם", StatusFilter::Exact(OrderStatus::Completed)),
    ("פתוחות", StatusFilter::Open),
    ("פתוח", StatusFilter::Open),
    ("progress", StatusFilter::Exact(OrderStatus::Ordering)),
    ("approved", StatusFilter::Exact(OrderStatus::SupplierApproved)),
    ("production", StatusFilter::Exact(OrderStatus::InProduction)),
    ("producing", StatusFilter::Exact(OrderStatus::InProduction)),
    ("shipped", StatusFilter::Exact(OrderStatus::Shipped)),
    ("customs", StatusFilter::Exact(OrderStatus::InCustoms)),
    ("arrived", StatusFilter::Exact(OrderStatus::ArrivedAtWarehouse)),
    ("completed", StatusFilter::Exact(OrderStatus::Completed)),
    ("finished", StatusFilter::Exact(OrderStatus::Completed)),
    ("open", StatusFilter::Open),
];

/// Looser stems tried only when no phrase matched.
const STATUS_STEMS: &[(&[&str], OrderStatus)] = &[
    (&["ייצור", "יצור", "production"], OrderStatus::InProduction),
    (&["מכס", "customs"], OrderStatus::InCustoms),
    (&["נשלח", "shipped", "shipping"], OrderStatus::Shipped),
    (&["שוחרר", "released"], OrderStatus::CustomsReleased),
    (&["הושלם", "completed", "complete"], OrderStatus::Completed),
];

/// Extracts the order status a question refers to.
#[must_use]
pub fn extract_order_status(text: &str) -> Option<StatusFilter> {
    let lower = text.to_lowercase();

    if let Some((phrase, filter)) = STATUS_PHRASES
        .iter()
        .find(|(phrase, _)| lower.contains(phrase))
    {
        debug!("Status match found: {:?} -> {:?}", phrase, filter);
        return Some(*filter);
    }

    let stem_match = STATUS_STEMS
        .iter()
        .find(|(stems, _)| stems.iter().any(|stem| lower.contains(stem)))
        .map(|(_, status)| StatusFilter::Exact(*status));

    if stem_match.is_some() {
        debug!("Partial status match found: {:?}", stem_match);
    } else {
        debug!("No status found in text: {}", text);
    }
    stem_match
}
