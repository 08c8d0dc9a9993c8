//! Catalog product entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog item. There is no owner; mutation is gated by role only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// Validated product fields, used for both create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}
