//! Core of the JSON identity store.
//! - `catalog`: in-memory user/claim catalog persisted to two JSON files
//!   with commit-on-write semantics and default bootstrap.
//! - `store`: the storage contract the external identity engine consumes,
//!   plus the adapter mapping it onto the catalog.

pub mod catalog;
pub mod errors;
pub mod store;
