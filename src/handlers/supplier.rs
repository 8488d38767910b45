//! Supplier answers - counts per country and per-country listings.

use crate::{
    core::supplier::{
        count_suppliers, count_suppliers_by_countries, count_suppliers_with_advance_payment,
        get_suppliers_by_country, get_suppliers_with_advance_payment,
    },
    entities::supplier,
    errors::Result,
    llm::SupplierSummarizer,
    parsers::Language,
};
use sea_orm::DatabaseConnection;
use std::fmt::Write;
use tracing::{info, warn};

/// Counts suppliers in each of `countries`, or in total when empty.
pub async fn supplier_count(
    db: &DatabaseConnection,
    lang: Language,
    countries: &[String],
) -> Result<String> {
    match countries {
        [] => total_count(db, lang).await,
        [country] => {
            let counts = count_suppliers_by_countries(db, countries).await?;
            let count = counts.first().map_or(0, |(_, count)| *count);
            info!("{count} suppliers in {country}");
            Ok(single_country_reply(lang, country, count))
        }
        _ => {
            let counts = count_suppliers_by_countries(db, countries).await?;
            info!("Supplier counts per country: {counts:?}");
            multi_country_reply(lang, &counts)
        }
    }
}

async fn total_count(db: &DatabaseConnection, lang: Language) -> Result<String> {
    let (total, active) = count_suppliers(db).await?;
    info!("Total suppliers: {total}, active: {active}");

    Ok(match (lang, active < total) {
        (Language::Hebrew, true) => format!("יש לנו סה\"כ {total} ספקים במערכת, מתוכם {active} פעילים"),
        (Language::Hebrew, false) => format!("יש לנו סה\"כ {total} ספקים במערכת"),
        (Language::English, true) => {
            format!("We have {total} suppliers in total, {active} of them active")
        }
        (Language::English, false) => format!("We have {total} suppliers in total"),
    })
}

fn single_country_reply(lang: Language, country: &str, count: u64) -> String {
    match (lang, count) {
        (Language::Hebrew, 0) => format!("אין ספקים במדינה {country}."),
        (Language::Hebrew, _) => format!("יש {count} ספקים במדינה {country}."),
        (Language::English, 0) => format!("There are no suppliers in {country}."),
        (Language::English, _) => format!("There are {count} suppliers in {country}."),
    }
}

fn multi_country_reply(lang: Language, counts: &[(String, u64)]) -> Result<String> {
    let mut reply = lang
        .pick("הנה הספירה לפי מדינות:\n", "Here's the count by country:\n")
        .to_string();
    let unit = lang.pick("ספקים", "suppliers");
    for (country, count) in counts {
        writeln!(reply, "• {country}: {count} {unit}")?;
    }
    let total: u64 = counts.iter().map(|(_, count)| count).sum();
    write!(reply, "\n{}: {total} {unit}", lang.pick("סה\"כ", "Total"))?;
    Ok(reply)
}

/// Lists the suppliers that take an advance payment, with their percentage.
pub async fn advance_payment_suppliers(db: &DatabaseConnection, lang: Language) -> Result<String> {
    let count = count_suppliers_with_advance_payment(db).await?;
    info!("{count} suppliers take an advance payment");
    if count == 0 {
        return Ok(lang
            .pick(
                "אין ספקים שדורשים תשלום מקדמה.",
                "No suppliers require an advance payment.",
            )
            .to_string());
    }

    let suppliers = get_suppliers_with_advance_payment(db).await?;
    let mut reply = match lang {
        Language::Hebrew => format!("{count} ספקים דורשים תשלום מקדמה:\n"),
        Language::English => format!("{count} suppliers require an advance payment:\n"),
    };
    for supplier in &suppliers {
        let pct = supplier.advance_percentage.unwrap_or_default();
        writeln!(reply, "• {} ({}, {pct}%)", supplier.name, supplier.country)?;
    }
    Ok(reply.trim_end().to_string())
}

/// The plain answer used when no LLM summary is available.
#[must_use]
pub fn fallback_listing(lang: Language, country: &str, suppliers: &[supplier::Model]) -> String {
    let names = suppliers
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    match lang {
        Language::Hebrew => format!(
            "נמצאו {} ספקים במדינה {country}: {names}",
            suppliers.len()
        ),
        Language::English => format!("Found {} suppliers in {country}: {names}", suppliers.len()),
    }
}

/// Describes the suppliers in `country`, through the LLM when available.
pub async fn suppliers_by_country(
    db: &DatabaseConnection,
    summarizer: Option<&dyn SupplierSummarizer>,
    question: &str,
    lang: Language,
    country: &str,
) -> Result<String> {
    let suppliers = get_suppliers_by_country(db, country).await?;
    info!("Found {} suppliers in {country}", suppliers.len());

    if suppliers.is_empty() {
        return Ok(match lang {
            Language::Hebrew => format!("אין ספקים במדינה {country} במסד הנתונים."),
            Language::English => format!("There are no suppliers in {country} in the database."),
        });
    }

    let Some(summarizer) = summarizer else {
        return Ok(fallback_listing(lang, country, &suppliers));
    };

    match summarizer.summarize(question, lang, country, &suppliers).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            warn!("LLM summary failed, using plain listing: {e}");
            Ok(fallback_listing(lang, country, &suppliers))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::supplier::{NewSupplier, create_supplier},
        errors::Error,
        test_utils::*,
    };
    use async_trait::async_trait;

    struct FixedSummary;

    #[async_trait]
    impl SupplierSummarizer for FixedSummary {
        async fn summarize(
            &self,
            _question: &str,
            lang: Language,
            country: &str,
            suppliers: &[supplier::Model],
        ) -> Result<String> {
            Ok(match lang {
                Language::Hebrew => format!("{} ספקים מ-{country}", suppliers.len()),
                Language::English => format!("{} suppliers from {country}", suppliers.len()),
            })
        }
    }

    struct FailingSummary;

    #[async_trait]
    impl SupplierSummarizer for FailingSummary {
        async fn summarize(
            &self,
            _question: &str,
            _lang: Language,
            _country: &str,
            _suppliers: &[supplier::Model],
        ) -> Result<String> {
            Err(Error::Llm {
                message: "timeout".to_string(),
            })
        }
    }

    async fn seed(db: &DatabaseConnection) -> Result<()> {
        create_test_supplier(db, "Shanghai Pets", "China").await?;
        create_test_supplier(db, "Beijing Toys", "China").await?;
        create_test_supplier(db, "Berlin Feed", "Germany").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_single_country_count() -> Result<()> {
        let db = setup_test_db().await?;
        seed(&db).await?;

        let reply = supplier_count(&db, Language::English, &["China".to_string()]).await?;
        assert_eq!(reply, "There are 2 suppliers in China.");
        let reply = supplier_count(&db, Language::Hebrew, &["Italy".to_string()]).await?;
        assert_eq!(reply, "אין ספקים במדינה Italy.");
        Ok(())
    }

    #[tokio::test]
    async fn test_multi_country_count() -> Result<()> {
        let db = setup_test_db().await?;
        seed(&db).await?;

        let reply = supplier_count(
            &db,
            Language::Hebrew,
            &["China".to_string(), "Germany".to_string()],
        )
        .await?;
        assert_eq!(
            reply,
            "הנה הספירה לפי מדינות:\n• China: 2 ספקים\n• Germany: 1 ספקים\n\nסה\"כ: 3 ספקים"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_total_count() -> Result<()> {
        let db = setup_test_db().await?;
        seed(&db).await?;

        let reply = supplier_count(&db, Language::English, &[]).await?;
        assert_eq!(reply, "We have 3 suppliers in total");
        Ok(())
    }

    #[tokio::test]
    async fn test_listing_uses_summarizer_and_falls_back() -> Result<()> {
        let db = setup_test_db().await?;
        seed(&db).await?;

        let summarized = suppliers_by_country(
            &db,
            Some(&FixedSummary),
            "suppliers in China?",
            Language::English,
            "China",
        )
        .await?;
        assert_eq!(summarized, "2 suppliers from China");

        let hebrew = suppliers_by_country(
            &db,
            Some(&FixedSummary),
            "אילו ספקים יש בסין?",
            Language::Hebrew,
            "China",
        )
        .await?;
        assert_eq!(hebrew, "2 ספקים מ-China");

        let fallback = suppliers_by_country(
            &db,
            Some(&FailingSummary),
            "ספקים בסין",
            Language::Hebrew,
            "China",
        )
        .await?;
        assert_eq!(fallback, "נמצאו 2 ספקים במדינה China: Beijing Toys, Shanghai Pets");

        let no_llm =
            suppliers_by_country(&db, None, "suppliers in China", Language::English, "China")
                .await?;
        assert_eq!(no_llm, "Found 2 suppliers in China: Beijing Toys, Shanghai Pets");
        Ok(())
    }

    #[tokio::test]
    async fn test_advance_payment_suppliers() -> Result<()> {
        let db = setup_test_db().await?;
        let reply = advance_payment_suppliers(&db, Language::English).await?;
        assert_eq!(reply, "No suppliers require an advance payment.");

        seed(&db).await?;
        let mut new_supplier = NewSupplier::new("Shanghai Deposits", "China");
        new_supplier.advance_percentage = Some(30.0);
        create_supplier(&db, new_supplier).await?;

        let reply = advance_payment_suppliers(&db, Language::English).await?;
        assert_eq!(
            reply,
            "1 suppliers require an advance payment:\n• Shanghai Deposits (China, 30%)"
        );
        let reply = advance_payment_suppliers(&db, Language::Hebrew).await?;
        assert!(reply.starts_with("1 ספקים דורשים תשלום מקדמה:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_listing_for_empty_country() -> Result<()> {
        let db = setup_test_db().await?;
        let reply =
            suppliers_by_country(&db, Some(&FixedSummary), "q", Language::Hebrew, "Spain").await?;
        assert_eq!(reply, "אין ספקים במדינה Spain במסד הנתונים.");
        Ok(())
    }
}
