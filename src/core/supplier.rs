//! Supplier business logic - lookups and counts by country.
//!
//! Country comparisons are case-insensitive; countries are stored under their
//! canonical English name but older rows may differ in case.

use crate::{
    entities::{Supplier, supplier},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};

/// Maximum number of suppliers returned by a country listing
pub const SUPPLIER_LIST_LIMIT: u64 = 20;

/// Longest production or shipping lead time accepted, in weeks
pub const MAX_LEAD_TIME_WEEKS: i32 = 520;

/// Parameters for inserting a supplier.
#[derive(Debug, Clone)]
pub struct NewSupplier {
    /// Company name, must not be blank
    pub name: String,
    /// Canonical English country name
    pub country: String,
    /// City, if known
    pub city: Option<String>,
    /// Main contact person, if known
    pub contact_person: Option<String>,
    /// Inactive suppliers are counted separately
    pub is_active: bool,
    /// Import license number
    pub import_license: Option<String>,
    /// Import license expiry
    pub license_expiry: Option<NaiveDateTime>,
    /// Feed license number
    pub feed_license: Option<String>,
    /// Feed license expiry
    pub feed_license_expiry: Option<NaiveDateTime>,
    /// Percentage of the total paid up front; `None` or 0 means no advance
    pub advance_percentage: Option<f64>,
    /// Production lead time, `0..=MAX_LEAD_TIME_WEEKS`
    pub production_time_weeks: i32,
    /// Shipping time, `0..=MAX_LEAD_TIME_WEEKS`
    pub shipping_time_weeks: i32,
    /// Default invoicing currency code
    pub currency: String,
}

impl NewSupplier {
    /// An active supplier with no licenses, no advance, 6 weeks production
    /// and 4 weeks shipping, invoicing in USD.
    #[must_use]
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            city: None,
            contact_person: None,
            is_active: true,
            import_license: None,
            license_expiry: None,
            feed_license: None,
            feed_license_expiry: None,
            advance_percentage: None,
            production_time_weeks: 6,
            shipping_time_weeks: 4,
            currency: "USD".to_string(),
        }
    }
}

/// Checks that a lead time in weeks is within `0..=MAX_LEAD_TIME_WEEKS`.
pub fn validate_lead_time(label: &str, weeks: i32) -> Result<()> {
    if (0..=MAX_LEAD_TIME_WEEKS).contains(&weeks) {
        Ok(())
    } else {
        Err(Error::Config {
            message: format!("{label} must be between 0 and {MAX_LEAD_TIME_WEEKS} weeks, got {weeks}"),
        })
    }
}

/// Inserts a supplier after validating its name, advance percentage and
/// lead times.
pub async fn create_supplier<C>(db: &C, new_supplier: NewSupplier) -> Result<supplier::Model>
where
    C: ConnectionTrait,
{
    if new_supplier.name.trim().is_empty() {
        return Err(Error::Config {
            message: "Supplier name cannot be empty".to_string(),
        });
    }

    if let Some(pct) = new_supplier.advance_percentage {
        if !(0.0..=100.0).contains(&pct) {
            return Err(Error::InvalidAmount { amount: pct });
        }
    }

    validate_lead_time("production_time_weeks", new_supplier.production_time_weeks)?;
    validate_lead_time("shipping_time_weeks", new_supplier.shipping_time_weeks)?;

    let has_advance_payment = new_supplier.advance_percentage.is_some_and(|pct| pct > 0.0);

    let model = supplier::ActiveModel {
        name: Set(new_supplier.name.trim().to_string()),
        country: Set(new_supplier.country),
        city: Set(new_supplier.city),
        contact_person: Set(new_supplier.contact_person),
        is_active: Set(new_supplier.is_active),
        import_license: Set(new_supplier.import_license),
        license_expiry: Set(new_supplier.license_expiry),
        feed_license: Set(new_supplier.feed_license),
        feed_license_expiry: Set(new_supplier.feed_license_expiry),
        has_advance_payment: Set(has_advance_payment),
        advance_percentage: Set(new_supplier.advance_percentage),
        production_time_weeks: Set(new_supplier.production_time_weeks),
        shipping_time_weeks: Set(new_supplier.shipping_time_weeks),
        currency: Set(new_supplier.currency),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Finds a supplier by its unique ID.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<supplier::Model>> {
    Supplier::find_by_id(supplier_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a supplier by exact name.
pub async fn get_supplier_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

fn country_equals(country: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(supplier::Column::Country))).eq(country.to_lowercase())
}

/// Up to [`SUPPLIER_LIST_LIMIT`] suppliers in `country`, ordered by name.
pub async fn get_suppliers_by_country(
    db: &DatabaseConnection,
    country: &str,
) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .filter(country_equals(country))
        .order_by_asc(supplier::Column::Name)
        .limit(SUPPLIER_LIST_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Up to [`SUPPLIER_LIST_LIMIT`] suppliers that take an advance payment,
/// largest advance first.
pub async fn get_suppliers_with_advance_payment(
    db: &DatabaseConnection,
) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::HasAdvancePayment.eq(true))
        .order_by_desc(supplier::Column::AdvancePercentage)
        .order_by_asc(supplier::Column::Name)
        .limit(SUPPLIER_LIST_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of suppliers that take an advance payment.
pub async fn count_suppliers_with_advance_payment(db: &DatabaseConnection) -> Result<u64> {
    Supplier::find()
        .filter(supplier::Column::HasAdvancePayment.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Number of suppliers in `country`.
pub async fn count_suppliers_in_country(db: &DatabaseConnection, country: &str) -> Result<u64> {
    Supplier::find()
        .filter(country_equals(country))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Number of suppliers per country, in the order the countries were given.
pub async fn count_suppliers_by_countries(
    db: &DatabaseConnection,
    countries: &[String],
) -> Result<Vec<(String, u64)>> {
    let mut counts = Vec::with_capacity(countries.len());
    for country in countries {
        let count = count_suppliers_in_country(db, country).await?;
        counts.push((country.clone(), count));
    }
    Ok(counts)
}

/// Total and active supplier counts.
pub async fn count_suppliers<C>(db: &C) -> Result<(u64, u64)>
where
    C: ConnectionTrait,
{
    let total = Supplier::find().count(db).await?;
    let active = Supplier::find()
        .filter(supplier::Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok((total, active))
}
