//! Import license expiry lookups.

use crate::{
    entities::{Supplier, supplier},
    errors::Result,
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, prelude::*};

/// Suppliers whose import license expires between `start` and `end`
/// (inclusive), soonest first.
pub async fn get_suppliers_with_expiring_license(
    db: &DatabaseConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .filter(supplier::Column::LicenseExpiry.between(start, end))
        .order_by_asc(supplier::Column::LicenseExpiry)
        .all(db)
        .await
        .map_err(Into::into)
}
