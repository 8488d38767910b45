//! Core business logic - the queries behind every answer.
//!
//! Handlers never touch `SeaORM` directly; they call into these modules.

/// Customs brokerages and agents
pub mod customs;
/// Import license expiry lookups
pub mod license;
/// Order creation, lookups, counts and totals
pub mod order;
/// Advance/final payment split and order timelines
pub mod payment;
/// Supplier creation, lookups and counts
pub mod supplier;
