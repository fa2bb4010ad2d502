//! Column and search-field metadata for the presentation layer.

use serde::Serialize;

use super::{OrderSearchField, OrderSortField, PageSize, ProductSearchField, ProductSortField};

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn<F> {
    /// Field key the column shows.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
    /// Sort field requested by a header click; `None` for fixed columns.
    pub sort: Option<F>,
}

impl<F> TableColumn<F> {
    /// A column whose header toggles sorting on `field`.
    #[must_use]
    pub const fn sortable(key: &'static str, label: &'static str, field: F) -> Self {
        Self {
            key,
            label,
            sort: Some(field),
        }
    }

    /// A column without sorting.
    #[must_use]
    pub const fn fixed(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sort: None,
        }
    }
}

/// Option offered by the search field picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOption<F> {
    pub value: F,
    pub label: &'static str,
}

/// Everything a client needs to draw a table's controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayout<S, O> {
    pub columns: Vec<TableColumn<O>>,
    pub search_fields: Vec<SearchOption<S>>,
    pub page_sizes: [usize; 5],
}

/// Layout of the products table.
#[must_use]
pub fn product_layout() -> TableLayout<ProductSearchField, ProductSortField> {
    TableLayout {
        columns: vec![
            TableColumn::sortable("name", "Name", ProductSortField::Name),
            TableColumn::sortable("price", "Price", ProductSortField::Price),
            TableColumn::fixed("description", "Description"),
            TableColumn::sortable("quantity", "Quantity", ProductSortField::Quantity),
            TableColumn::sortable("createdAt", "Created", ProductSortField::CreatedAt),
            TableColumn::sortable("updatedAt", "Updated", ProductSortField::UpdatedAt),
        ],
        search_fields: vec![
            SearchOption { value: ProductSearchField::Name, label: "Name" },
            SearchOption { value: ProductSearchField::Description, label: "Description" },
            SearchOption { value: ProductSearchField::Price, label: "Price" },
            SearchOption { value: ProductSearchField::Quantity, label: "Quantity" },
        ],
        page_sizes: PageSize::OPTIONS,
    }
}

/// Layout of the orders table.
#[must_use]
pub fn order_layout() -> TableLayout<OrderSearchField, OrderSortField> {
    TableLayout {
        columns: vec![
            TableColumn::sortable("productName", "Product", OrderSortField::ProductName),
            TableColumn::sortable("quantity", "Quantity", OrderSortField::Quantity),
            TableColumn::sortable("customerName", "Customer", OrderSortField::CustomerName),
            TableColumn::sortable("customerEmail", "Email", OrderSortField::CustomerEmail),
            TableColumn::sortable("status", "Status", OrderSortField::Status),
            TableColumn::sortable("createdAt", "Created", OrderSortField::CreatedAt),
            TableColumn::sortable("updatedAt", "Updated", OrderSortField::UpdatedAt),
        ],
        search_fields: vec![
            SearchOption { value: OrderSearchField::CustomerName, label: "Customer name" },
            SearchOption { value: OrderSearchField::CustomerEmail, label: "Customer email" },
            SearchOption { value: OrderSearchField::Status, label: "Status" },
            SearchOption { value: OrderSearchField::ProductName, label: "Product" },
        ],
        page_sizes: PageSize::OPTIONS,
    }
}
