//! Catalog data models
//!
//! Defines the product record and the payloads used to create and update it.
//! Field names on the wire are Portuguese (`nome`, `valor`, `quantidade`,
//! `criadoEm`) to stay compatible with existing clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Unique identifier for a product
pub type ProductId = String;

/// A catalog item as stored in the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Generated at creation, never mutated
    pub id: ProductId,
    /// Display name; not unique
    #[serde(rename = "nome")]
    pub name: Option<String>,
    /// Unit price
    #[serde(rename = "valor")]
    pub price: f64,
    /// Units in stock
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    /// When the product was created, never mutated
    #[serde(rename = "criadoEm")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Build a fresh product from a creation payload
    ///
    /// Assigns a new UUID v4 and the current time. Whatever `id` or
    /// `criadoEm` the caller sent was already dropped during deserialization.
    pub fn new(new: NewProduct) -> Self {
        Self {
            id: Self::generate_id(),
            name: new.name,
            price: new.price,
            quantity: new.quantity,
            created_at: Utc::now(),
        }
    }

    /// Generate a new unique ID for a product
    pub fn generate_id() -> ProductId {
        Uuid::new_v4().to_string()
    }
}

/// Payload for creating a product
///
/// Unknown fields (including `id` and `criadoEm`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    /// Display name
    #[serde(rename = "nome", default)]
    pub name: Option<String>,
    /// Unit price
    #[serde(rename = "valor", default)]
    pub price: f64,
    /// Units in stock
    #[serde(rename = "quantidade", default)]
    pub quantity: i32,
}

/// Sparse update: only `Some` fields overwrite the stored value
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ProductUpdate {
    /// New unit price
    #[serde(rename = "valor", default)]
    pub price: Option<f64>,
    /// New stock quantity
    #[serde(rename = "quantidade", default)]
    pub quantity: Option<i32>,
}

impl ProductUpdate {
    /// Build an update where zero means "leave unchanged"
    ///
    /// The legacy `/api/produto/alterar` route sends a full product, so a
    /// field it did not mean to change arrives as `0`.
    pub fn from_zero_as_unset(price: f64, quantity: i32) -> Self {
        Self {
            price: (price != 0.0).then_some(price),
            quantity: (quantity != 0).then_some(quantity),
        }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.quantity.is_none()
    }
}
