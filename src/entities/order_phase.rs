//! Order phase entity - One segment of an order's timeline.
//!
//! Payment phases carry the amount due and are used to answer
//! "which payments are due" questions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order phase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_phases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: i64,
    /// Display name, e.g. "תשלום מקדמה"
    pub phase_name: String,
    /// Position in the timeline, starting at 1
    pub phase_order: i32,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub duration_days: i32,
    /// Whether this phase is a payment milestone
    pub is_payment: bool,
    /// Amount due for payment phases
    pub amount: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
