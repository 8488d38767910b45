/// Database connection and table creation
pub mod database;

/// Application settings and seed data from config.toml
pub mod settings;

pub use settings::{AppConfig, LlmConfig, ServerConfig, load_app_configuration};
