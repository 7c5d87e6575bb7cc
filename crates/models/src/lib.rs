//! Data model for the JSON identity store.
//! - Entity definitions shared by the catalog and the storage adapter.
//! - Model-level validation with clear error types.

pub mod claim;
pub mod errors;
pub mod requests;
pub mod user;
