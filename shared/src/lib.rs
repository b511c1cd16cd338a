//! Shared types for the Stockroom inventory manager
//!
//! Domain model and wire-format helpers used by both the gateway
//! client and the interaction-state layer.

pub mod models;

// Re-exports
pub use models::{Product, ProductPayload};
pub use serde::{Deserialize, Serialize};
