//! Supplier entity - A vendor we import from.
//!
//! Besides contact details a supplier carries its import and feed license
//! expiry dates and its payment terms (advance percentage, lead times).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company name
    pub name: String,
    /// Canonical English country name (e.g. "China", "Germany")
    pub country: String,
    /// City, if known
    pub city: Option<String>,
    /// Main contact person, if known
    pub contact_person: Option<String>,
    /// Inactive suppliers are still counted in totals but reported separately
    pub is_active: bool,
    /// Import license number
    pub import_license: Option<String>,
    /// When the import license expires
    pub license_expiry: Option<DateTime>,
    /// Feed license number
    pub feed_license: Option<String>,
    /// When the feed license expires
    pub feed_license_expiry: Option<DateTime>,
    /// Whether the supplier requires an advance payment
    pub has_advance_payment: bool,
    /// Advance percentage of the order total (0-100)
    pub advance_percentage: Option<f64>,
    /// Typical production lead time in weeks
    pub production_time_weeks: i32,
    /// Typical shipping time in weeks
    pub shipping_time_weeks: i32,
    /// Default invoicing currency (e.g. "USD")
    pub currency: String,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
