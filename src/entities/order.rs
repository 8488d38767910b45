//! Order entity - A purchase order placed with a supplier.
//!
//! `status` holds one of the canonical Hebrew status strings
//! (see [`crate::parsers::status::OrderStatus`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human facing number in the `ORD-YYYY-NNN` format
    #[sea_orm(unique)]
    pub order_number: String,
    /// Supplier this order was placed with
    pub supplier_id: i64,
    /// Canonical status string
    pub status: String,
    /// Order total in `original_currency`
    pub total_amount: f64,
    /// Advance part of the total, when the supplier takes an advance
    pub advance_amount: Option<f64>,
    /// Remaining part of the total paid before shipping
    pub final_payment_amount: Option<f64>,
    /// Currency code of the amounts
    pub original_currency: String,
    /// Final estimated arrival date
    pub eta_final: DateTime,
    /// Shipping container, once shipped
    pub container_number: Option<String>,
    /// Free text notes
    pub notes: Option<String>,
    /// Customs brokerage handling the order
    pub customs_company_id: Option<i64>,
    /// Customs agent handling the order
    pub customs_agent_id: Option<i64>,
    /// When the order was created
    pub created_at: DateTime,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    /// Optional customs company
    #[sea_orm(
        belongs_to = "super::customs_company::Entity",
        from = "Column::CustomsCompanyId",
        to = "super::customs_company::Column::Id"
    )]
    CustomsCompany,
    /// Optional customs agent
    #[sea_orm(
        belongs_to = "super::customs_agent::Entity",
        from = "Column::CustomsAgentId",
        to = "super::customs_agent::Column::Id"
    )]
    CustomsAgent,
    /// Timeline phases of the order
    #[sea_orm(has_many = "super::order_phase::Entity")]
    Phases,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::customs_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomsCompany.def()
    }
}

impl Related<super::customs_agent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomsAgent.def()
    }
}

impl Related<super::order_phase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
