//! Shared test utilities for Supplier Desk.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test suppliers and orders with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        order::{self, NewOrder},
        supplier::{self, NewSupplier},
    },
    entities,
    errors::Result,
    parsers::OrderStatus,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test supplier with sensible defaults.
///
/// # Defaults
/// * active, no licenses, no advance payment
/// * 6 weeks production, 4 weeks shipping, USD
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    name: &str,
    country: &str,
) -> Result<entities::supplier::Model> {
    supplier::create_supplier(db, NewSupplier::new(name, country)).await
}

/// The ETA used by [`create_test_order`]: 2025-12-31 00:00.
pub fn test_eta() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Order parameters with test defaults, for struct-update syntax.
///
/// # Defaults
/// * number: "ORD-2025-001"
/// * status: בייצור, total 10,000, ETA from [`test_eta`]
pub fn test_new_order(supplier_id: i64) -> NewOrder {
    NewOrder {
        order_number: "ORD-2025-001".to_string(),
        supplier_id,
        status: OrderStatus::InProduction,
        total_amount: 10_000.0,
        currency: None,
        eta_final: test_eta(),
        container_number: None,
        notes: None,
        created_at: None,
    }
}

/// Creates a test order in production with the default total and ETA.
pub async fn create_test_order(
    db: &DatabaseConnection,
    order_number: &str,
    supplier_id: i64,
) -> Result<entities::order::Model> {
    order::create_order(
        db,
        NewOrder {
            order_number: order_number.to_string(),
            ..test_new_order(supplier_id)
        },
    )
    .await
}

/// Creates a test order with custom parameters.
/// Use this when you need to test specific statuses, amounts or dates.
pub async fn create_custom_order(
    db: &DatabaseConnection,
    order_number: &str,
    supplier_id: i64,
    status: OrderStatus,
    total_amount: f64,
    eta_final: NaiveDateTime,
) -> Result<entities::order::Model> {
    order::create_order(
        db,
        NewOrder {
            order_number: order_number.to_string(),
            status,
            total_amount,
            eta_final,
            ..test_new_order(supplier_id)
        },
    )
    .await
}
