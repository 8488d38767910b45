//! Customs brokerages and their agents, and linking them to orders.

use crate::{
    entities::{
        CustomsAgent, CustomsCompany, PurchaseOrder, customs_agent, customs_company, order,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Returns the customs company called `name`, creating it if needed.
pub async fn get_or_create_customs_company<C>(
    db: &C,
    name: &str,
) -> Result<customs_company::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if let Some(existing) = CustomsCompany::find()
        .filter(customs_company::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    customs_company::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Returns the agent called `name` at `company`, creating it if needed.
pub async fn get_or_create_customs_agent<C>(
    db: &C,
    company: &customs_company::Model,
    name: &str,
    phone: Option<String>,
) -> Result<customs_agent::Model>
where
    C: ConnectionTrait,
{
    let name = name.trim();
    if let Some(existing) = CustomsAgent::find()
        .filter(customs_agent::Column::CustomsCompanyId.eq(company.id))
        .filter(customs_agent::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    customs_agent::ActiveModel {
        customs_company_id: Set(company.id),
        name: Set(name.to_string()),
        phone: Set(phone),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Links an order to the customs company (and optionally agent) handling it.
pub async fn assign_customs<C>(
    db: &C,
    order_id: i64,
    company: &customs_company::Model,
    agent: Option<&customs_agent::Model>,
) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let order = PurchaseOrder::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            reference: order_id.to_string(),
        })?;

    let mut active: order::ActiveModel = order.into();
    active.customs_company_id = Set(Some(company.id));
    active.customs_agent_id = Set(agent.map(|a| a.id));
    active.update(db).await.map_err(Into::into)
}
