//! Order business logic - creation, lookups, status counts and totals.
//!
//! Status filtering goes through [`StatusFilter`]: `Open` means any status
//! other than completed, `Exact` compares against the canonical string.

use crate::{
    core::payment::split_payment,
    entities::{
        CustomsAgent, CustomsCompany, PurchaseOrder, Supplier, customs_agent, customs_company,
        order, supplier,
    },
    errors::{Error, Result},
    parsers::{OrderStatus, StatusFilter, order_number::is_valid_order_number},
};
use chrono::{Local, NaiveDateTime};
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*, sea_query::SimpleExpr,
};

/// Maximum number of orders listed for a status
pub const STATUS_LIST_LIMIT: u64 = 20;
/// Number of orders in the "recent orders" answer
pub const RECENT_ORDERS_LIMIT: u64 = 5;

/// Parameters for inserting an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// `ORD-YYYY-NNN`, upper-cased before insert
    pub order_number: String,
    /// Must reference an existing supplier
    pub supplier_id: i64,
    /// Stored as its canonical Hebrew string
    pub status: OrderStatus,
    /// Non-negative, finite total
    pub total_amount: f64,
    /// Defaults to the supplier's currency
    pub currency: Option<String>,
    /// Final ETA; the phase timeline ends here
    pub eta_final: NaiveDateTime,
    /// Shipping container, once shipped
    pub container_number: Option<String>,
    /// Free text notes
    pub notes: Option<String>,
    /// Defaults to now
    pub created_at: Option<NaiveDateTime>,
}

/// An order together with everything the details answer shows.
#[derive(Debug, Clone)]
pub struct OrderDetails {
    /// The order row
    pub order: order::Model,
    /// Supplier the order was placed with
    pub supplier: supplier::Model,
    /// Customs brokerage, when assigned
    pub customs_company: Option<customs_company::Model>,
    /// Customs agent, when assigned
    pub customs_agent: Option<customs_agent::Model>,
}

/// Totals over all orders and over open orders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderFinancials {
    /// Sum of all order totals, across currencies
    pub total_value: f64,
    /// Mean order total, 0 when there are no orders
    pub average_value: f64,
    /// Number of orders
    pub order_count: u64,
    /// Orders not yet completed
    pub open_count: u64,
    /// Sum of the open orders' totals
    pub open_value: f64,
}

/// Creates an order for an existing supplier.
///
/// The advance and final payment amounts are split from the total using the
/// supplier's advance percentage.
pub async fn create_order<C>(db: &C, new_order: NewOrder) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    let order_number = new_order.order_number.trim().to_uppercase();
    if !is_valid_order_number(&order_number) {
        return Err(Error::Config {
            message: format!("Invalid order number: {:?}", new_order.order_number),
        });
    }

    if new_order.total_amount < 0.0 || !new_order.total_amount.is_finite() {
        return Err(Error::InvalidAmount {
            amount: new_order.total_amount,
        });
    }

    let supplier = Supplier::find_by_id(new_order.supplier_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::SupplierNotFound {
            name: new_order.supplier_id.to_string(),
        })?;

    let split = split_payment(new_order.total_amount, supplier.advance_percentage);

    let model = order::ActiveModel {
        order_number: Set(order_number),
        supplier_id: Set(supplier.id),
        status: Set(new_order.status.as_str().to_string()),
        total_amount: Set(new_order.total_amount),
        advance_amount: Set(split.advance),
        final_payment_amount: Set(Some(split.final_payment)),
        original_currency: Set(new_order.currency.unwrap_or(supplier.currency)),
        eta_final: Set(new_order.eta_final),
        container_number: Set(new_order.container_number),
        notes: Set(new_order.notes),
        customs_company_id: Set(None),
        customs_agent_id: Set(None),
        created_at: Set(new_order
            .created_at
            .unwrap_or_else(|| Local::now().naive_local())),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Finds an order by its `ORD-YYYY-NNN` number with its supplier and
/// customs handlers.
pub async fn get_order_by_number(
    db: &DatabaseConnection,
    order_number: &str,
) -> Result<Option<OrderDetails>> {
    let Some((order, supplier)) = PurchaseOrder::find()
        .filter(order::Column::OrderNumber.eq(order_number))
        .find_also_related(Supplier)
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let supplier = supplier.ok_or_else(|| Error::SupplierNotFound {
        name: order.supplier_id.to_string(),
    })?;

    let customs_company = match order.customs_company_id {
        Some(id) => CustomsCompany::find_by_id(id).one(db).await?,
        None => None,
    };
    let customs_agent = match order.customs_agent_id {
        Some(id) => CustomsAgent::find_by_id(id).one(db).await?,
        None => None,
    };

    Ok(Some(OrderDetails {
        order,
        supplier,
        customs_company,
        customs_agent,
    }))
}

fn status_condition(filter: StatusFilter) -> SimpleExpr {
    match filter {
        StatusFilter::Open => order::Column::Status.ne(OrderStatus::Completed.as_str()),
        StatusFilter::Exact(status) => order::Column::Status.eq(status.as_str()),
    }
}

/// Counts orders, optionally restricted to a status filter.
pub async fn count_orders(db: &DatabaseConnection, filter: Option<StatusFilter>) -> Result<u64> {
    let mut query = PurchaseOrder::find();
    if let Some(filter) = filter {
        query = query.filter(status_condition(filter));
    }
    query.count(db).await.map_err(Into::into)
}

/// Up to [`STATUS_LIST_LIMIT`] orders matching `filter`, newest first, with
/// their suppliers.
pub async fn get_orders_by_status(
    db: &DatabaseConnection,
    filter: StatusFilter,
) -> Result<Vec<(order::Model, Option<supplier::Model>)>> {
    PurchaseOrder::find()
        .filter(status_condition(filter))
        .order_by_desc(order::Column::CreatedAt)
        .limit(STATUS_LIST_LIMIT)
        .find_also_related(Supplier)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The [`RECENT_ORDERS_LIMIT`] most recently created orders with their suppliers.
pub async fn get_recent_orders(
    db: &DatabaseConnection,
) -> Result<Vec<(order::Model, Option<supplier::Model>)>> {
    PurchaseOrder::find()
        .order_by_desc(order::Column::CreatedAt)
        .limit(RECENT_ORDERS_LIMIT)
        .find_also_related(Supplier)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums and averages order totals. Amounts are summed as stored, across
/// currencies.
#[allow(clippy::cast_precision_loss)]
pub async fn order_financials(db: &DatabaseConnection) -> Result<OrderFinancials> {
    let orders = PurchaseOrder::find().all(db).await?;

    let open = StatusFilter::Open;
    let mut financials = OrderFinancials {
        total_value: 0.0,
        average_value: 0.0,
        order_count: 0,
        open_count: 0,
        open_value: 0.0,
    };
    for order in &orders {
        financials.total_value += order.total_amount;
        financials.order_count += 1;
        if open.matches(&order.status) {
            financials.open_count += 1;
            financials.open_value += order.total_amount;
        }
    }
    if financials.order_count > 0 {
        financials.average_value = financials.total_value / financials.order_count as f64;
    }
    Ok(financials)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::supplier::{NewSupplier, create_supplier},
        test_utils::*,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_order_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Shanghai Pets", "China").await?;

        let bad_number = create_order(
            &db,
            NewOrder {
                order_number: "ORDER-1".to_string(),
                ..test_new_order(supplier.id)
            },
        )
        .await;
        assert!(matches!(bad_number.unwrap_err(), Error::Config { .. }));

        let bad_amount = create_order(
            &db,
            NewOrder {
                total_amount: -5.0,
                ..test_new_order(supplier.id)
            },
        )
        .await;
        assert!(matches!(
            bad_amount.unwrap_err(),
            Error::InvalidAmount { .. }
        ));

        let missing_supplier = create_order(&db, test_new_order(9999)).await;
        assert!(matches!(
            missing_supplier.unwrap_err(),
            Error::SupplierNotFound { .. }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_order_splits_payment() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new_supplier = NewSupplier::new("Shanghai Pets", "China");
        new_supplier.advance_percentage = Some(30.0);
        new_supplier.currency = "CNY".to_string();
        let supplier = create_supplier(&db, new_supplier).await?;

        let order = create_order(
            &db,
            NewOrder {
                order_number: "ord-2025-010".to_string(),
                total_amount: 50_000.0,
                ..test_new_order(supplier.id)
            },
        )
        .await?;
        assert_eq!(order.order_number, "ORD-2025-010");
        assert_eq!(order.advance_amount, Some(15_000.0));
        assert_eq!(order.final_payment_amount, Some(35_000.0));
        assert_eq!(order.original_currency, "CNY");
        assert_eq!(order.status, "בייצור");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_by_number() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Shanghai Pets", "China").await?;
        create_test_order(&db, "ORD-2024-001", supplier.id).await?;

        let details = get_order_by_number(&db, "ORD-2024-001").await?.unwrap();
        assert_eq!(details.supplier.name, "Shanghai Pets");
        assert!(details.customs_company.is_none());
        assert!(details.customs_agent.is_none());

        assert!(get_order_by_number(&db, "ORD-2024-999").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_open_filter_excludes_completed() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Shanghai Pets", "China").await?;
        let eta = date(2025, 12, 1);
        create_custom_order(&db, "ORD-2025-001", supplier.id, OrderStatus::InProduction, 100.0, eta)
            .await?;
        create_custom_order(&db, "ORD-2025-002", supplier.id, OrderStatus::InCustoms, 200.0, eta)
            .await?;
        create_custom_order(&db, "ORD-2025-003", supplier.id, OrderStatus::Completed, 300.0, eta)
            .await?;

        assert_eq!(count_orders(&db, None).await?, 3);
        assert_eq!(count_orders(&db, Some(StatusFilter::Open)).await?, 2);
        assert_eq!(
            count_orders(&db, Some(StatusFilter::Exact(OrderStatus::InCustoms))).await?,
            1
        );
        assert_eq!(
            count_orders(&db, Some(StatusFilter::Exact(OrderStatus::Shipped))).await?,
            0
        );

        let open = get_orders_by_status(&db, StatusFilter::Open).await?;
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|(o, s)| o.status != "הושלם" && s.is_some()));
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Shanghai Pets", "China").await?;
        for day in 1..=7 {
            create_order(
                &db,
                NewOrder {
                    order_number: format!("ORD-2025-{day:03}"),
                    created_at: Some(date(2025, 3, day)),
                    ..test_new_order(supplier.id)
                },
            )
            .await?;
        }

        let recent = get_recent_orders(&db).await?;
        let numbers: Vec<&str> = recent.iter().map(|(o, _)| o.order_number.as_str()).collect();
        assert_eq!(
            numbers,
            vec![
                "ORD-2025-007",
                "ORD-2025-006",
                "ORD-2025-005",
                "ORD-2025-004",
                "ORD-2025-003"
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_order_financials() -> Result<()> {
        let db = setup_test_db().await?;
        let empty = order_financials(&db).await?;
        assert_eq!(empty.order_count, 0);
        assert_eq!(empty.average_value, 0.0);

        let supplier = create_test_supplier(&db, "Shanghai Pets", "China").await?;
        let eta = date(2025, 12, 1);
        create_custom_order(&db, "ORD-2025-001", supplier.id, OrderStatus::InProduction, 100.0, eta)
            .await?;
        create_custom_order(&db, "ORD-2025-002", supplier.id, OrderStatus::Completed, 300.0, eta)
            .await?;

        let financials = order_financials(&db).await?;
        assert_eq!(financials.total_value, 400.0);
        assert_eq!(financials.average_value, 200.0);
        assert_eq!(financials.order_count, 2);
        assert_eq!(financials.open_count, 1);
        assert_eq!(financials.open_value, 100.0);
        Ok(())
    }
}
