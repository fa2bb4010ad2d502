//! Searchable and sortable columns of the product and order tables.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use shop_admin_core::Product;

use super::{OrderRow, SortKey, TableRecord};

/// Product fields the search box can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSearchField {
    #[default]
    Name,
    Description,
    Price,
    Quantity,
}

/// Product columns that can be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSortField {
    Name,
    Price,
    Quantity,
    CreatedAt,
    UpdatedAt,
}

/// Order fields the search box can target.
///
/// `ProductName` is derived: it is resolved through the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderSearchField {
    #[default]
    CustomerName,
    CustomerEmail,
    Status,
    ProductName,
}

/// Order columns that can be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderSortField {
    ProductName,
    Quantity,
    CustomerName,
    CustomerEmail,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl TableRecord for Product {
    type SearchField = ProductSearchField;
    type SortField = ProductSortField;

    fn search_text(&self, field: ProductSearchField) -> Option<Cow<'_, str>> {
        Some(match field {
            ProductSearchField::Name => Cow::Borrowed(self.name.as_str()),
            ProductSearchField::Description => Cow::Borrowed(self.description.as_str()),
            ProductSearchField::Price => Cow::Owned(self.price.normalize().to_string()),
            ProductSearchField::Quantity => Cow::Owned(self.quantity.to_string()),
        })
    }

    fn sort_key(&self, field: ProductSortField) -> SortKey<'_> {
        match field {
            ProductSortField::Name => SortKey::Text(&self.name),
            ProductSortField::Price => SortKey::Decimal(self.price),
            ProductSortField::Quantity => SortKey::Integer(i64::from(self.quantity)),
            ProductSortField::CreatedAt => self.created_at.map_or(SortKey::Missing, SortKey::Instant),
            ProductSortField::UpdatedAt => self.updated_at.map_or(SortKey::Missing, SortKey::Instant),
        }
    }
}

impl TableRecord for OrderRow {
    type SearchField = OrderSearchField;
    type SortField = OrderSortField;

    fn search_text(&self, field: OrderSearchField) -> Option<Cow<'_, str>> {
        let text = match field {
            OrderSearchField::CustomerName => self.order.customer_name.as_str(),
            OrderSearchField::CustomerEmail => self.order.customer_email.as_str(),
            OrderSearchField::Status => self.order.status.as_str(),
            OrderSearchField::ProductName => self.product_name.as_str(),
        };
        Some(Cow::Borrowed(text))
    }

    fn sort_key(&self, field: OrderSortField) -> SortKey<'_> {
        let order = &self.order;
        match field {
            OrderSortField::ProductName => SortKey::Text(&self.product_name),
            OrderSortField::Quantity => SortKey::Integer(i64::from(order.quantity)),
            OrderSortField::CustomerName => SortKey::Text(&order.customer_name),
            OrderSortField::CustomerEmail => SortKey::Text(&order.customer_email),
            OrderSortField::Status => SortKey::Text(order.status.as_str()),
            OrderSortField::CreatedAt => order.created_at.map_or(SortKey::Missing, SortKey::Instant),
            OrderSortField::UpdatedAt => order.updated_at.map_or(SortKey::Missing, SortKey::Instant),
        }
    }
}
