//! Customs agent entity - A contact person at a customs company.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customs agent database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customs_agents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customs_company_id: i64,
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customs_company::Entity",
        from = "Column::CustomsCompanyId",
        to = "super::customs_company::Column::Id"
    )]
    CustomsCompany,
}

impl Related<super::customs_company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomsCompany.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
