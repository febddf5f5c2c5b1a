//! Business services layered on the persistence adapter.

pub mod catalog;
pub mod seed;

pub use catalog::{CatalogError, CatalogService, PRODUCT_COLLECTION};
pub use seed::SeedOutcome;
