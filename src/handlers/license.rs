//! Import license expiry answers.

use super::format_date;
use crate::{
    core::license::get_suppliers_with_expiring_license,
    errors::Result,
    parsers::{Language, MonthRange},
};
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use tracing::info;

/// Lists suppliers whose import license expires within `range`.
pub async fn expiring_licenses(
    db: &DatabaseConnection,
    lang: Language,
    range: &MonthRange,
) -> Result<String> {
    let suppliers = get_suppliers_with_expiring_license(db, range.start, range.end).await?;
    info!(
        "Found {} suppliers with licenses expiring {} .. {}",
        suppliers.len(),
        range.start,
        range.end
    );

    if suppliers.is_empty() {
        return Ok(lang
            .pick(
                "אין ספקים שתוקף רישיון הייבוא שלהם מסתיים בתקופה זו.",
                "No suppliers have their import license expiring in this period.",
            )
            .to_string());
    }

    let mut reply = match lang {
        Language::Hebrew => format!(
            "נמצאו {} ספקים שתוקף רישיון הייבוא שלהם מסתיים:",
            suppliers.len()
        ),
        Language::English => format!(
            "Found {} suppliers whose import license expires:",
            suppliers.len()
        ),
    };
    let valid_until = lang.pick("תוקף עד", "valid until");
    for supplier in &suppliers {
        let expiry = supplier
            .license_expiry
            .map(|date| format_date(lang, date))
            .unwrap_or_default();
        write!(
            reply,
            "\n- {} ({}) - {valid_until}: {expiry}",
            supplier.name, supplier.country
        )?;
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::supplier::{NewSupplier, create_supplier},
        test_utils::*,
    };
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_expiring_licenses_reply() -> Result<()> {
        let db = setup_test_db().await?;
        let mut new_supplier = NewSupplier::new("Shanghai Pets", "China");
        new_supplier.license_expiry = NaiveDate::from_ymd_opt(2025, 12, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0);
        create_supplier(&db, new_supplier).await?;

        let december = MonthRange::whole_month(2025, 12).unwrap();
        let hebrew = expiring_licenses(&db, Language::Hebrew, &december).await?;
        assert_eq!(
            hebrew,
            "נמצאו 1 ספקים שתוקף רישיון הייבוא שלהם מסתיים:\n- Shanghai Pets (China) - תוקף עד: 15.12.2025"
        );

        let english = expiring_licenses(&db, Language::English, &december).await?;
        assert!(english.starts_with("Found 1 suppliers whose import license expires:"));
        assert!(english.ends_with("valid until: 2025-12-15"));
        Ok(())
    }

    #[tokio::test]
    async fn test_no_expiring_licenses_reply() -> Result<()> {
        let db = setup_test_db().await?;
        let january = MonthRange::whole_month(2026, 1).unwrap();
        let reply = expiring_licenses(&db, Language::English, &january).await?;
        assert_eq!(
            reply,
            "No suppliers have their import license expiring in this period."
        );
        Ok(())
    }
}
