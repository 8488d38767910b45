//! First-run seeding of suppliers and orders from config.toml.
//!
//! Seeding only happens when the supplier table is empty, so restarting
//! the service never duplicates rows. All rows go in one transaction: a
//! failed seed leaves the database empty and the next start retries it.

use crate::{
    config::{
        AppConfig,
        settings::{OrderSeed, SupplierSeed},
    },
    core::{
        customs::{assign_customs, get_or_create_customs_agent, get_or_create_customs_company},
        order::{NewOrder, create_order},
        payment::insert_phases,
        supplier::{NewSupplier, count_suppliers, create_supplier},
    },
    entities::supplier,
    errors::{Error, Result},
    parsers::OrderStatus,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::HashMap;
use tracing::info;

/// Rows inserted by [`seed_initial_data`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    /// Suppliers inserted
    pub suppliers: usize,
    /// Orders inserted
    pub orders: usize,
    /// Order phases planned and inserted
    pub phases: usize,
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn new_supplier(seed: &SupplierSeed) -> NewSupplier {
    NewSupplier {
        city: seed.city.clone(),
        contact_person: seed.contact_person.clone(),
        is_active: seed.is_active,
        import_license: seed.import_license.clone(),
        license_expiry: seed.license_expiry.map(midnight),
        feed_license: seed.feed_license.clone(),
        feed_license_expiry: seed.feed_license_expiry.map(midnight),
        advance_percentage: seed.advance_percentage,
        production_time_weeks: seed.production_time_weeks,
        shipping_time_weeks: seed.shipping_time_weeks,
        currency: seed.currency.clone(),
        ..NewSupplier::new(seed.name.clone(), seed.country.clone())
    }
}

/// Inserts the configured suppliers and orders into an empty database.
///
/// Each order gets its planned timeline, and its customs company and agent
/// when configured.
///
/// # Errors
/// Fails on an order referencing an unknown supplier, an unknown status,
/// or any database error. Nothing is inserted in that case.
pub async fn seed_initial_data(db: &DatabaseConnection, config: &AppConfig) -> Result<SeedSummary> {
    let txn = db.begin().await?;

    let (existing, _) = count_suppliers(&txn).await?;
    if existing > 0 {
        info!("Database already has {existing} suppliers, skipping seed.");
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();
    let mut by_name: HashMap<String, supplier::Model> = HashMap::new();
    for seed in &config.suppliers {
        let created = create_supplier(&txn, new_supplier(seed)).await?;
        by_name.insert(created.name.clone(), created);
        summary.suppliers += 1;
    }

    for seed in &config.orders {
        summary.phases += seed_order(&txn, seed, &by_name).await?;
        summary.orders += 1;
    }

    txn.commit().await?;
    info!(
        "Seeded {} suppliers, {} orders and {} order phases.",
        summary.suppliers, summary.orders, summary.phases
    );
    Ok(summary)
}

async fn seed_order<C>(
    db: &C,
    seed: &OrderSeed,
    suppliers: &HashMap<String, supplier::Model>,
) -> Result<usize>
where
    C: ConnectionTrait,
{
    let supplier = suppliers
        .get(seed.supplier.trim())
        .ok_or_else(|| Error::SupplierNotFound {
            name: seed.supplier.clone(),
        })?;
    let status = OrderStatus::from_canonical(&seed.status).ok_or_else(|| Error::Config {
        message: format!(
            "Order {} has unknown status {:?}",
            seed.order_number, seed.status
        ),
    })?;

    let order = create_order(
        db,
        NewOrder {
            order_number: seed.order_number.clone(),
            supplier_id: supplier.id,
            status,
            total_amount: seed.total_amount,
            currency: seed.currency.clone(),
            eta_final: midnight(seed.eta),
            container_number: seed.container_number.clone(),
            notes: seed.notes.clone(),
            created_at: seed.created_at.map(midnight),
        },
    )
    .await?;

    if let Some(company_name) = &seed.customs_company {
        let company = get_or_create_customs_company(db, company_name).await?;
        let agent = match &seed.customs_agent {
            Some(agent_name) => {
                Some(get_or_create_customs_agent(db, &company, agent_name, None).await?)
            }
            None => None,
        };
        assign_customs(db, order.id, &company, agent.as_ref()).await?;
    }

    let phases = insert_phases(db, &order, supplier).await?;
    Ok(phases.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        config::settings::parse_config,
        core::{order::get_order_by_number, supplier::get_supplier_by_name},
        test_utils::*,
    };

    const SEED_TOML: &str = r#"
        [[suppliers]]
        name = "Shanghai Pet Foods"
        country = "China"
        license_expiry = "2025-12-15"
        advance_percentage = 30.0

        [[suppliers]]
        name = "Berlin Feed"
        country = "Germany"

        [[orders]]
        order_number = "ORD-2025-001"
        supplier = "Shanghai Pet Foods"
        status = "בייצור"
        total_amount = 50000.0
        eta = "2025-11-20"
        customs_company = "Haifa Clearing"
        customs_agent = "Dana"

        [[orders]]
        order_number = "ORD-2025-002"
        supplier = "Berlin Feed"
        status = "הושלם"
        total_amount = 1200.0
        eta = "2025-06-01"
    "#;

    #[tokio::test]
    async fn test_seed_inserts_once() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SEED_TOML)?;

        let summary = seed_initial_data(&db, &config).await?;
        // 4 phases with an advance, 3 without
        assert_eq!(
            summary,
            SeedSummary {
                suppliers: 2,
                orders: 2,
                phases: 7
            }
        );

        let supplier = get_supplier_by_name(&db, "Shanghai Pet Foods").await?.unwrap();
        assert_eq!(
            supplier.license_expiry,
            NaiveDate::from_ymd_opt(2025, 12, 15).map(midnight)
        );

        let details = get_order_by_number(&db, "ORD-2025-001").await?.unwrap();
        assert_eq!(details.order.advance_amount, Some(15_000.0));
        assert_eq!(details.customs_company.unwrap().name, "Haifa Clearing");
        assert_eq!(details.customs_agent.unwrap().name, "Dana");

        let again = seed_initial_data(&db, &config).await?;
        assert_eq!(again, SeedSummary::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_unknown_supplier_and_status() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(
            r#"
            [[suppliers]]
            name = "Berlin Feed"
            country = "Germany"

            [[orders]]
            order_number = "ORD-2025-001"
            supplier = "Nobody"
            status = "בייצור"
            total_amount = 1.0
            eta = "2025-11-20"
            "#,
        )?;
        let result = seed_initial_data(&db, &config).await;
        assert!(matches!(result, Err(Error::SupplierNotFound { .. })));

        let db = setup_test_db().await?;
        let config = parse_config(
            r#"
            [[suppliers]]
            name = "Berlin Feed"
            country = "Germany"

            [[orders]]
            order_number = "ORD-2025-001"
            supplier = "Berlin Feed"
            status = "lost at sea"
            total_amount = 1.0
            eta = "2025-11-20"
            "#,
        )?;
        let result = seed_initial_data(&db, &config).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_nothing_behind() -> Result<()> {
        let db = setup_test_db().await?;
        let typo = SEED_TOML.replace("supplier = \"Berlin Feed\"", "supplier = \"Berlin Fed\"");
        let config = parse_config(&typo)?;

        let result = seed_initial_data(&db, &config).await;
        assert!(matches!(result, Err(Error::SupplierNotFound { .. })));
        assert_eq!(count_suppliers(&db).await?, (0, 0));
        assert!(get_order_by_number(&db, "ORD-2025-001").await?.is_none());

        let config = parse_config(SEED_TOML)?;
        let summary = seed_initial_data(&db, &config).await?;
        assert_eq!(summary.orders, 2);
        assert_eq!(summary.phases, 7);
        assert!(get_order_by_number(&db, "ORD-2025-002").await?.is_some());
        Ok(())
    }
}
