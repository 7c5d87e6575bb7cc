//! Storage contract boundary.
//!
//! `contract` defines the operation set the external identity engine
//! programs against; `adapter` maps it onto the catalog.

pub mod adapter;
pub mod contract;

pub use adapter::CatalogUserStore;
pub use contract::{StoreOutcome, UserStore};
