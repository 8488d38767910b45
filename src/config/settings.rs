//! Application settings loaded from config.toml
//!
//! The file is optional: every section has defaults so the service starts
//! with nothing but a `DATABASE_URL`. Optional `[[suppliers]]` and
//! `[[orders]]` tables seed an empty database on first run.

use crate::{
    core::supplier::validate_lead_time,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::{net::SocketAddr, path::Path};
use tracing::{debug, info};

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "SUPPLIER_DESK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// LLM settings for supplier summaries
    pub llm: LlmConfig,
    /// Suppliers to seed into an empty database
    pub suppliers: Vec<SupplierSeed>,
    /// Orders to seed into an empty database
    pub orders: Vec<OrderSeed>,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,
    /// Include the underlying error text in 500 responses
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            expose_error_details: false,
        }
    }
}

/// `[llm]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// When false, supplier lists are answered with the plain fallback text
    pub enabled: bool,
    /// Chat completion model name
    pub model: String,
    /// Base URL of an OpenAI compatible API
    pub base_url: String,
    /// Request timeout
    pub timeout_secs: u64,
    /// System prompt for supplier summaries of Hebrew questions
    pub system_prompt: String,
    /// System prompt for supplier summaries of English questions
    pub english_system_prompt: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 20,
            system_prompt: "אתה עוזר עסקי שמסביר למשתמש בעברית על ספקים בהתאם לשאלה. תן תשובה קצרה וברורה."
                .to_string(),
            english_system_prompt: "You are a business assistant who explains suppliers to the user in English according to the question. Give a short, clear answer."
                .to_string(),
        }
    }
}

/// A supplier row to seed. Dates are quoted `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierSeed {
    /// Unique supplier name, referenced by `[[orders]]`
    pub name: String,
    /// Canonical English country name
    pub country: String,
    /// City, if known
    #[serde(default)]
    pub city: Option<String>,
    /// Main contact person, if known
    #[serde(default)]
    pub contact_person: Option<String>,
    /// Defaults to true
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Import license number
    #[serde(default)]
    pub import_license: Option<String>,
    /// Import license expiry
    #[serde(default)]
    pub license_expiry: Option<NaiveDate>,
    /// Feed license number
    #[serde(default)]
    pub feed_license: Option<String>,
    /// Feed license expiry
    #[serde(default)]
    pub feed_license_expiry: Option<NaiveDate>,
    /// Percentage of the order total paid up front; absent means no advance
    #[serde(default)]
    pub advance_percentage: Option<f64>,
    /// Production lead time in weeks, default 6
    #[serde(default = "default_production_weeks")]
    pub production_time_weeks: i32,
    /// Shipping time in weeks, default 4
    #[serde(default = "default_shipping_weeks")]
    pub shipping_time_weeks: i32,
    /// Invoicing currency, default USD
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// An order row to seed, referencing its supplier by name.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderSeed {
    /// `ORD-YYYY-NNN`
    pub order_number: String,
    /// Name of a `[[suppliers]]` entry
    pub supplier: String,
    /// Canonical Hebrew status, e.g. `בייצור`
    pub status: String,
    /// Order total, non-negative
    pub total_amount: f64,
    /// Defaults to the supplier's currency
    #[serde(default)]
    pub currency: Option<String>,
    /// Final arrival date; the phase timeline is planned back from it
    pub eta: NaiveDate,
    /// Shipping container, once shipped
    #[serde(default)]
    pub container_number: Option<String>,
    /// Free text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to the seeding time
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    /// Customs brokerage handling the order, created if unknown
    #[serde(default)]
    pub customs_company: Option<String>,
    /// Agent at `customs_company`
    #[serde(default)]
    pub customs_agent: Option<String>,
}

const fn default_true() -> bool {
    true
}

const fn default_production_weeks() -> i32 {
    6
}

const fn default_shipping_weeks() -> i32 {
    4
}

fn default_currency() -> String {
    "USD".to_string()
}

impl AppConfig {
    /// Checks values serde cannot: the bind address, percentages and lead
    /// times.
    ///
    /// # Errors
    /// Returns an error for an unparsable bind address, an advance
    /// percentage outside 0-100 or a lead time outside
    /// `0..=MAX_LEAD_TIME_WEEKS`.
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config {
                message: format!(
                    "Invalid server.bind_address {:?}: {e}",
                    self.server.bind_address
                ),
            })?;

        for supplier in &self.suppliers {
            if let Some(pct) = supplier.advance_percentage {
                if !(0.0..=100.0).contains(&pct) {
                    return Err(Error::InvalidAmount { amount: pct });
                }
            }
            validate_lead_time(
                &format!("{} production_time_weeks", supplier.name),
                supplier.production_time_weeks,
            )?;
            validate_lead_time(
                &format!("{} shipping_time_weeks", supplier.name),
                supplier.shipping_time_weeks,
            )?;
        }

        for order in &self.orders {
            if order.total_amount < 0.0 || !order.total_amount.is_finite() {
                return Err(Error::InvalidAmount {
                    amount: order.total_amount,
                });
            }
        }

        Ok(())
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or
/// validation fails.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from a TOML string
///
/// # Errors
/// Returns an error if the TOML is invalid or validation fails.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration named by `SUPPLIER_DESK_CONFIG` (default
/// `./config.toml`), falling back to defaults when the file does not exist.
///
/// # Errors
/// Returns an error if an existing file cannot be parsed or is invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        info!("No config file at {path}, using defaults.");
        return Ok(AppConfig::default());
    }

    let config = load_config(&path)?;
    info!(
        "Loaded configuration from {path} ({} seed suppliers, {} seed orders).",
        config.suppliers.len(),
        config.orders.len()
    );
    Ok(config)
}
