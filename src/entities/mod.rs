//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the supplier, order and customs tables the chatbot reads.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customs_agent;
pub mod customs_company;
pub mod order;
pub mod order_phase;
pub mod supplier;

// Re-export specific types to avoid conflicts with `sea_orm::Order`
pub use customs_agent::{
    Column as CustomsAgentColumn, Entity as CustomsAgent, Model as CustomsAgentModel,
};
pub use customs_company::{
    Column as CustomsCompanyColumn, Entity as CustomsCompany, Model as CustomsCompanyModel,
};
pub use order::{Column as OrderColumn, Entity as PurchaseOrder, Model as OrderModel};
pub use order_phase::{Column as OrderPhaseColumn, Entity as OrderPhase, Model as OrderPhaseModel};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
