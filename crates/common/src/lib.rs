//! Shared utilities for the identity store crates.

pub mod utils;
