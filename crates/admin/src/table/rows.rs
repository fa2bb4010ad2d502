//! Order rows joined with their product names.

use std::collections::HashMap;

use serde::Serialize;
use shop_admin_core::{Order, Product, ProductId, UNKNOWN_PRODUCT};

/// Product id to name lookup built from a product snapshot.
///
/// Unknown ids resolve to [`UNKNOWN_PRODUCT`] instead of failing.
#[derive(Debug, Default)]
pub struct ProductNames<'a> {
    names: HashMap<&'a ProductId, &'a str>,
}

impl<'a> ProductNames<'a> {
    /// Index the given products. Later duplicates of an id are ignored.
    #[must_use]
    pub fn new(products: &'a [Product]) -> Self {
        let mut names = HashMap::with_capacity(products.len());
        for product in products {
            names.entry(&product.id).or_insert(product.name.as_str());
        }
        Self { names }
    }

    /// Name of the product, if it is known.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&'a str> {
        self.names.get(id).copied()
    }

    /// Name of the product or the unknown-product label.
    #[must_use]
    pub fn resolve(&self, id: &ProductId) -> &'a str {
        self.get(id).unwrap_or(UNKNOWN_PRODUCT)
    }
}

/// An order as displayed in the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    /// Resolved product name, or the unknown-product label.
    pub product_name: String,
    /// Whether `product_id` matched a product in the snapshot.
    pub product_known: bool,
}

impl OrderRow {
    /// Join every order with its product name, preserving order.
    #[must_use]
    pub fn join(orders: &[Order], products: &[Product]) -> Vec<Self> {
        let names = ProductNames::new(products);
        orders
            .iter()
            .map(|order| {
                let known = names.get(&order.product_id);
                Self {
                    order: order.clone(),
                    product_name: known.unwrap_or(UNKNOWN_PRODUCT).to_string(),
                    product_known: known.is_some(),
                }
            })
            .collect()
    }
}
