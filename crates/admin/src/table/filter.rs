//! Case-insensitive substring search.

use super::TableRecord;

/// Keep the records whose `field` contains `term`, ignoring case.
///
/// An empty term keeps everything. Records without a value for `field`
/// never match a non-empty term. Relative order is preserved.
pub fn filter<'a, R: TableRecord>(records: &'a [R], term: &str, field: R::SearchField) -> Vec<&'a R> {
    if term.is_empty() {
        return records.iter().collect();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .search_text(field)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use shop_admin_core::{OrderStatus, Product};

    use super::*;
    use crate::table::rows::fixtures::{order, product};
    use crate::table::{OrderRow, OrderSearchField, ProductSearchField};

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Desk Lamp"),
            product("p2", "Floor lamp"),
            product("p3", "Chair"),
        ]
    }

    #[test]
    fn test_empty_term_passes_everything() {
        let products = catalog();
        assert_eq!(filter(&products, "", ProductSearchField::Name).len(), 3);
    }

    #[test]
    fn test_match_ignores_case() {
        let products = catalog();
        let hits = filter(&products, "LAMP", ProductSearchField::Name);
        let names: Vec<&str> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Desk Lamp", "Floor lamp"]);
    }

    #[test]
    fn test_empty_list_yields_nothing() {
        let products: Vec<Product> = Vec::new();
        assert!(filter(&products, "lamp", ProductSearchField::Name).is_empty());
    }

    #[test]
    fn test_numeric_fields_match_string_form() {
        let mut products = catalog();
        products[2].quantity = 120;
        let hits = filter(&products, "12", ProductSearchField::Quantity);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chair");
    }

    #[test]
    fn test_orders_search_derived_product_name() {
        let products = catalog();
        let orders = vec![
            order("o1", "p1", OrderStatus::Pending, None),
            order("o2", "p3", OrderStatus::Completed, None),
            order("o3", "missing", OrderStatus::Pending, None),
        ];
        let rows = OrderRow::join(&orders, &products);

        let hits = filter(&rows, "lamp", OrderSearchField::ProductName);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].order.id.as_str(), "o1");

        let unknown = filter(&rows, "unknown", OrderSearchField::ProductName);
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].order.id.as_str(), "o3");

        let completed = filter(&rows, "complete", OrderSearchField::Status);
        assert_eq!(completed.len(), 1);
    }

    proptest! {
        #[test]
        fn filter_partitions_by_name(
            names in prop::collection::vec("[a-zA-Z ]{0,12}", 1..20),
            term in "[a-zA-Z]{1,3}",
        ) {
            let products: Vec<Product> = names
                .iter()
                .enumerate()
                .map(|(i, name)| product(&format!("p{i}"), name))
                .collect();
            let hits = filter(&products, &term, ProductSearchField::Name);
            let needle = term.to_lowercase();

            for hit in &hits {
                prop_assert!(hit.name.to_lowercase().contains(&needle));
            }
            let excluded = products
                .iter()
                .filter(|p| !hits.iter().any(|h| h.id == p.id));
            for product in excluded {
                prop_assert!(!product.name.to_lowercase().contains(&needle));
            }
        }
    }
}
