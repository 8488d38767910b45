//! Payment business logic - advance/final split and the order timeline.
//!
//! An order's timeline is planned backwards from its ETA: shipping ends on
//! the ETA, the final payment is due when production ends, and the advance
//! (for suppliers that take one) is due when production starts.

use crate::{
    entities::{OrderPhase, PurchaseOrder, Supplier, order, order_phase, supplier},
    errors::{Error, Result},
};
use chrono::{NaiveDateTime, TimeDelta};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::HashMap;
use tracing::debug;

/// Phase name of the up-front payment
pub const ADVANCE_PAYMENT_PHASE: &str = "תשלום מקדמה";
/// Phase name of the production period
pub const PRODUCTION_PHASE: &str = "ייצור";
/// Phase name of the payment due before shipping
pub const FINAL_PAYMENT_PHASE: &str = "תשלום סופי";
/// Phase name of the shipping period
pub const SHIPPING_PHASE: &str = "משלוח";

/// An order total split into its advance and final parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentSplit {
    /// Up-front part, `None` when the supplier takes no advance
    pub advance: Option<f64>,
    /// Remaining part
    pub final_payment: f64,
}

/// Splits `total` by the supplier's advance percentage.
///
/// The advance is rounded down to a whole amount and the final payment takes
/// the remainder, so the two parts always add up to `total`.
///
/// ```
/// use supplier_desk::core::payment::split_payment;
///
/// let split = split_payment(10_001.0, Some(30.0));
/// assert_eq!(split.advance, Some(3000.0));
/// assert_eq!(split.final_payment, 7001.0);
/// ```
#[must_use]
pub fn split_payment(total: f64, advance_percentage: Option<f64>) -> PaymentSplit {
    match advance_percentage {
        Some(pct) if pct > 0.0 => {
            let advance = (total * pct / 100.0).floor();
            PaymentSplit {
                advance: Some(advance),
                final_payment: total - advance,
            }
        }
        _ => PaymentSplit {
            advance: None,
            final_payment: total,
        },
    }
}

/// One phase of an order's timeline, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPhase {
    /// One of the `*_PHASE` names
    pub phase_name: &'static str,
    /// Position in the timeline, starting at 1
    pub phase_order: i32,
    /// First day of the phase
    pub start_date: NaiveDateTime,
    /// Last day; the due date of a payment
    pub end_date: NaiveDateTime,
    /// 0 for payments
    pub duration_days: i32,
    /// Payment milestones carry an amount
    pub is_payment: bool,
    /// Amount due, for payment phases
    pub amount: Option<f64>,
}

fn weeks_to_days(weeks: i32) -> i32 {
    weeks.max(0).saturating_mul(7)
}

fn days_before(moment: NaiveDateTime, days: i32, order: &order::Model) -> Result<NaiveDateTime> {
    moment
        .checked_sub_signed(TimeDelta::days(i64::from(days)))
        .ok_or_else(|| Error::Config {
            message: format!(
                "Timeline of order {} reaches before the earliest supported date",
                order.order_number
            ),
        })
}

/// Plans the timeline of `order`, in chronological order.
///
/// Payment phases last zero days: their start and end are the due date.
///
/// # Errors
/// Returns [`Error::Config`] when the supplier's lead times push the
/// timeline out of the representable date range.
pub fn plan_phases(order: &order::Model, supplier: &supplier::Model) -> Result<Vec<PlannedPhase>> {
    let shipping_days = weeks_to_days(supplier.shipping_time_weeks);
    let production_days = weeks_to_days(supplier.production_time_weeks);

    let shipping_end = order.eta_final;
    let shipping_start = days_before(shipping_end, shipping_days, order)?;
    let production_end = shipping_start;
    let production_start = days_before(production_end, production_days, order)?;

    let final_amount = order.final_payment_amount.unwrap_or_else(|| {
        order.total_amount - order.advance_amount.unwrap_or(0.0)
    });
    let advance_amount = order
        .advance_amount
        .filter(|amount| supplier.has_advance_payment && *amount > 0.0);

    let mut phases = Vec::with_capacity(4);
    if let Some(amount) = advance_amount {
        phases.push(PlannedPhase {
            phase_name: ADVANCE_PAYMENT_PHASE,
            phase_order: 0,
            start_date: production_start,
            end_date: production_start,
            duration_days: 0,
            is_payment: true,
            amount: Some(amount),
        });
    }
    phases.push(PlannedPhase {
        phase_name: PRODUCTION_PHASE,
        phase_order: 0,
        start_date: production_start,
        end_date: production_end,
        duration_days: production_days,
        is_payment: false,
        amount: None,
    });
    phases.push(PlannedPhase {
        phase_name: FINAL_PAYMENT_PHASE,
        phase_order: 0,
        start_date: production_end,
        end_date: production_end,
        duration_days: 0,
        is_payment: true,
        amount: Some(final_amount),
    });
    phases.push(PlannedPhase {
        phase_name: SHIPPING_PHASE,
        phase_order: 0,
        start_date: shipping_start,
        end_date: shipping_end,
        duration_days: shipping_days,
        is_payment: false,
        amount: None,
    });

    for (position, phase) in (1..).zip(phases.iter_mut()) {
        phase.phase_order = position;
    }
    Ok(phases)
}

/// Plans and stores the timeline of `order`.
pub async fn insert_phases<C>(
    db: &C,
    order: &order::Model,
    supplier: &supplier::Model,
) -> Result<Vec<order_phase::Model>>
where
    C: ConnectionTrait,
{
    let mut stored = Vec::new();
    for phase in plan_phases(order, supplier)? {
        let model = order_phase::ActiveModel {
            order_id: Set(order.id),
            phase_name: Set(phase.phase_name.to_string()),
            phase_order: Set(phase.phase_order),
            start_date: Set(phase.start_date),
            end_date: Set(phase.end_date),
            duration_days: Set(phase.duration_days),
            is_payment: Set(phase.is_payment),
            amount: Set(phase.amount),
            ..Default::default()
        };
        stored.push(model.insert(db).await?);
    }
    debug!(
        "Stored {} phases for order {}",
        stored.len(),
        order.order_number
    );
    Ok(stored)
}

/// A payment milestone with the order and supplier it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDue {
    /// Stored phase name, e.g. [`FINAL_PAYMENT_PHASE`]
    pub phase_name: String,
    /// Day the payment is due
    pub due_date: NaiveDateTime,
    /// Amount in `currency`, if recorded
    pub amount: Option<f64>,
    /// `ORD-YYYY-NNN` number of the order
    pub order_number: String,
    /// Currency of the order
    pub currency: String,
    /// Supplier of the order, empty if it no longer exists
    pub supplier_name: String,
}

async fn attach_orders(
    db: &DatabaseConnection,
    phases: Vec<(order_phase::Model, Option<order::Model>)>,
) -> Result<Vec<PaymentDue>> {
    let supplier_ids: Vec<i64> = phases
        .iter()
        .filter_map(|(_, order)| order.as_ref().map(|o| o.supplier_id))
        .collect();
    let suppliers: HashMap<i64, String> = Supplier::find()
        .filter(supplier::Column::Id.is_in(supplier_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    Ok(phases
        .into_iter()
        .filter_map(|(phase, order)| {
            let order = order?;
            Some(PaymentDue {
                phase_name: phase.phase_name,
                due_date: phase.end_date,
                amount: phase.amount,
                supplier_name: suppliers
                    .get(&order.supplier_id)
                    .cloned()
                    .unwrap_or_default(),
                order_number: order.order_number,
                currency: order.original_currency,
            })
        })
        .collect())
}

/// Payment milestones due between `start` and `end` (inclusive), earliest first.
pub async fn get_payment_phases_between(
    db: &DatabaseConnection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<PaymentDue>> {
    let phases = OrderPhase::find()
        .filter(order_phase::Column::IsPayment.eq(true))
        .filter(order_phase::Column::EndDate.between(start, end))
        .order_by_asc(order_phase::Column::EndDate)
        .find_also_related(PurchaseOrder)
        .all(db)
        .await?;
    attach_orders(db, phases).await
}

/// Payment milestones of one order, or `None` if no such order exists.
pub async fn get_payment_phases_for_order(
    db: &DatabaseConnection,
    order_number: &str,
) -> Result<Option<Vec<PaymentDue>>> {
    let Some(order) = PurchaseOrder::find()
        .filter(order::Column::OrderNumber.eq(order_number))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let phases = OrderPhase::find()
        .filter(order_phase::Column::OrderId.eq(order.id))
        .filter(order_phase::Column::IsPayment.eq(true))
        .order_by_asc(order_phase::Column::PhaseOrder)
        .all(db)
        .await?
        .into_iter()
        .map(|phase| (phase, Some(order.clone())))
        .collect();
    attach_orders(db, phases).await.map(Some)
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

    #[test]
    fn test_split_payment() {
        let split = split_payment(50_000.0, Some(30.0));
        assert_eq!(split.advance, Some(15_000.0));
        assert_eq!(split.final_payment, 35_000.0);

        let split = split_payment(999.0, Some(25.0));
        assert_eq!(split.advance, Some(249.0));
        assert_eq!(split.final_payment, 750.0);

        assert_eq!(split_payment(1000.0, None).advance, None);
        assert_eq!(split_payment(1000.0, Some(0.0)).final_payment, 1000.0);
    }

    #[tokio::test]
    async fn test_plan_phases_walks_back_from_eta() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new_supplier = NewSupplier::new("Shanghai Pets", "China");
        new_supplier.advance_percentage = Some(30.0);
        new_supplier.production_time_weeks = 6;
        new_supplier.shipping_time_weeks = 4;
        let supplier = create_supplier(&db, new_supplier).await?;
        let order = create_custom_order(
            &db,
            "ORD-2025-001",
            supplier.id,
            crate::parsers::OrderStatus::InProduction,
            10_000.0,
            date(2025, 12, 31),
        )
        .await?;

        let phases = plan_phases(&order, &supplier)?;
        let names: Vec<&str> = phases.iter().map(|p| p.phase_name).collect();
        assert_eq!(
            names,
            vec![
                ADVANCE_PAYMENT_PHASE,
                PRODUCTION_PHASE,
                FINAL_PAYMENT_PHASE,
                SHIPPING_PHASE
            ]
        );
        let orders: Vec<i32> = phases.iter().map(|p| p.phase_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);

        // Shipping: 28 days ending on the ETA
        assert_eq!(phases[3].end_date, date(2025, 12, 31));
        assert_eq!(phases[3].start_date, date(2025, 12, 3));
        // Final payment due when production ends
        assert_eq!(phases[2].end_date, date(2025, 12, 3));
        assert_eq!(phases[2].amount, Some(7000.0));
        // Production: 42 days, advance due at its start
        assert_eq!(phases[1].start_date, date(2025, 10, 22));
        assert_eq!(phases[0].end_date, date(2025, 10, 22));
        assert_eq!(phases[0].amount, Some(3000.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_plan_phases_without_advance() -> Result<()> {
        let db = setup_test_db().await?;
        let supplier = create_test_supplier(&db, "Berlin Feed", "Germany").await?;
        let order = create_test_order(&db, "ORD-2025-002", supplier.id).await?;

        let phases = plan_phases(&order, &supplier)?;
        assert_eq!(phases.len(), 3);
        assert!(phases.iter().all(|p| p.phase_name != ADVANCE_PAYMENT_PHASE));
        let final_payment = phases.iter().find(|p| p.is_payment).unwrap();
        assert_eq!(final_payment.amount, Some(order.total_amount));
        Ok(())
    }

    #[test]
    fn test_plan_phases_rejects_unrepresentable_lead_time() {
        let mut new_supplier = NewSupplier::new("Slow Works", "China");
        new_supplier.production_time_weeks = 2_000_000_000;
        let supplier = supplier::Model {
            id: 1,
            name: new_supplier.name,
            country: new_supplier.country,
            city: None,
            contact_person: None,
            is_active: true,
            import_license: None,
            license_expiry: None,
            feed_license: None,
            feed_license_expiry: None,
            has_advance_payment: false,
            advance_percentage: None,
            production_time_weeks: new_supplier.production_time_weeks,
            shipping_time_weeks: new_supplier.shipping_time_weeks,
            currency: new_supplier.currency,
        };
        let order = order::Model {
            id: 1,
            order_number: "ORD-2025-001".to_string(),
            supplier_id: 1,
            status: "בייצור".to_string(),
            total_amount: 100.0,
            advance_amount: None,
            final_payment_amount: Some(100.0),
            original_currency: "USD".to_string(),
            eta_final: date(2025, 12, 31),
            container_number: None,
            notes: None,
            customs_company_id: None,
            customs_agent_id: None,
            created_at: date(2025, 1, 1),
        };

        let result = plan_phases(&order, &supplier);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_payment_phases_between_and_for_order() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new_supplier = NewSupplier::new("Shanghai Pets", "China");
        new_supplier.advance_percentage = Some(30.0);
        let supplier = create_supplier(&db, new_supplier).await?;
        let order = create_custom_order(
            &db,
            "ORD-2025-003",
            supplier.id,
            crate::parsers::OrderStatus::InProduction,
            10_000.0,
            date(2025, 12, 31),
        )
        .await?;
        insert_phases(&db, &order, &supplier).await?;

        // Final payment falls on 2025-12-03, the advance on 2025-10-22
        let december = get_payment_phases_between(
            &db,
            date(2025, 12, 1),
            date(2025, 12, 31),
        )
        .await?;
        assert_eq!(december.len(), 1);
        assert_eq!(december[0].phase_name, FINAL_PAYMENT_PHASE);
        assert_eq!(december[0].supplier_name, "Shanghai Pets");
        assert_eq!(december[0].order_number, "ORD-2025-003");

        let all = get_payment_phases_for_order(&db, "ORD-2025-003")
            .await?
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].phase_name, ADVANCE_PAYMENT_PHASE);

        assert!(
            get_payment_phases_for_order(&db, "ORD-1999-999")
                .await?
                .is_none()
        );
        Ok(())
    }
}
