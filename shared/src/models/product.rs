//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Product entity as held by the remote store
///
/// A `Product` value always carries a server-assigned id; the
/// transient "not yet created" state exists only inside the mutation
/// workflow's draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier (wire: string or integer)
    #[serde(deserialize_with = "serde_helpers::lenient_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form category label
    #[serde(default)]
    pub category: Option<String>,
    /// Unit price, two-place monetary precision (wire: decimal string or number)
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create/update request body
///
/// POST and PUT share the same shape; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub quantity: i64,
}
