//! Core data model for tender analysis.
//!
//! Everything here is read-only input to the pipeline: opportunities arrive
//! from the intake collaborator already structured into sections, and the two
//! reference catalogs are loaded once per run and passed explicitly through
//! every call (never held in process-wide state).

mod catalog;
mod opportunity;

pub use catalog::{
    CatalogProduct, ProductCatalog, TestService, TestServiceCatalog, VoltageClass,
};
pub use opportunity::{parse_deadline, LineItem, LineItemId, Opportunity};
