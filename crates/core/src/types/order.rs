//! Order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require_text};
use super::{Email, OrderId, OrderStatus, ProductId, Record};

/// An order as held by the record store.
///
/// `product_id` is not enforced by the store: it may reference a product that
/// no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    /// Ordered units, at least 1.
    pub quantity: u32,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "super::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

/// Payload for creating an order.
///
/// A missing status defaults to `pending`; the store stamps `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_id: ProductId,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub status: OrderStatus,
}

impl NewOrder {
    /// Validate the draft and normalize the customer email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a required field is blank, the
    /// quantity is zero or the email is malformed.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        require_text(self.product_id.as_str(), "productId")?;
        require_text(&self.customer_name, "customerName")?;
        require_quantity(self.quantity)?;
        self.customer_email = Email::parse(&self.customer_email)?.into_inner();
        Ok(self)
    }

    /// The record the store holds once it accepts this draft as `id`.
    #[must_use]
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            product_id: self.product_id,
            quantity: self.quantity,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            status: self.status,
            created_at: Some(created_at),
            updated_at: None,
        }
    }
}

/// Partial update of an order. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    /// Validate the fields present in the patch, normalizing the email.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] under the same rules as
    /// [`NewOrder::validated`], applied only to present fields.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        if let Some(product_id) = &self.product_id {
            require_text(product_id.as_str(), "productId")?;
        }
        if let Some(name) = &self.customer_name {
            require_text(name, "customerName")?;
        }
        if let Some(quantity) = self.quantity {
            require_quantity(quantity)?;
        }
        if let Some(email) = self.customer_email.take() {
            self.customer_email = Some(Email::parse(&email)?.into_inner());
        }
        Ok(self)
    }

    /// Copy the present fields onto `order` and stamp `updated_at`.
    pub fn apply_to(&self, order: &mut Order, at: DateTime<Utc>) {
        if let Some(product_id) = &self.product_id {
            order.product_id = product_id.clone();
        }
        if let Some(quantity) = self.quantity {
            order.quantity = quantity;
        }
        if let Some(name) = &self.customer_name {
            order.customer_name.clone_from(name);
        }
        if let Some(email) = &self.customer_email {
            order.customer_email.clone_from(email);
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        order.updated_at = Some(at);
    }
}

const fn require_quantity(quantity: u32) -> Result<(), ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            requirement: "at least 1",
        });
    }
    Ok(())
}
