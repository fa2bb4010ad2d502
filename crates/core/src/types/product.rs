//! Product records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require_text};
use super::{ProductId, Record};

/// A product as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unit price, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Units in stock.
    #[serde(default)]
    pub quantity: u32,
    /// When the product was created, if known.
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the product was last updated, if ever.
    #[serde(default, with = "super::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Payload for creating a product. The store assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: u32,
}

impl NewProduct {
    /// Check the draft before it is sent to the store.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name is blank or the price is
    /// negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "name")?;
        if self.price < Decimal::ZERO {
            return Err(ValidationError::OutOfRange {
                field: "price",
                requirement: "zero or greater",
            });
        }
        Ok(())
    }

    /// The record the store holds once it accepts this draft as `id`.
    #[must_use]
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            quantity: self.quantity,
            created_at: Some(created_at),
            updated_at: None,
        }
    }
}

/// Partial update of a product. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl ProductPatch {
    /// Check the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a present field violates the same
    /// rules as [`NewProduct::validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text(name, "name")?;
        }
        if self.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(ValidationError::OutOfRange {
                field: "price",
                requirement: "zero or greater",
            });
        }
        Ok(())
    }

    /// Copy the present fields onto `product` and stamp `updated_at`.
    pub fn apply_to(&self, product: &mut Product, at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        product.updated_at = Some(at);
    }
}
