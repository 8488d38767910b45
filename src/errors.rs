//! Unified error type for Supplier Desk.
//!
//! Extractors and classifiers never fail; everything that talks to the
//! database, the filesystem or the LLM returns [`Result`].

use thiserror::Error;

/// All errors that can surface from the query, configuration and LLM layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// Database error bubbled up from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config file, socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP failure while calling the LLM provider
    #[error("LLM request failed: {0}")]
    LlmHttp(#[from] reqwest::Error),

    /// LLM answered but the payload was unusable
    #[error("LLM response error: {message}")]
    Llm {
        /// What was wrong with the response
        message: String,
    },

    /// A supplier referenced by name does not exist
    #[error("Supplier not found: {name}")]
    SupplierNotFound {
        /// Name that was looked up
        name: String,
    },

    /// An order referenced by id or number does not exist
    #[error("Order not found: {reference}")]
    OrderNotFound {
        /// Order id or order number
        reference: String,
    },

    /// An amount or percentage outside its valid range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// Formatting a reply failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
