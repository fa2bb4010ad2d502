//! Per-product order counts and the best-selling ranking.

use std::collections::HashMap;

use serde::Serialize;
use shop_admin_core::{Order, Product, ProductId};

use super::rounded_percent;
use crate::table::stable_sort_by;

/// Orders placed for one product in the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub orders: usize,
    /// Share of the period's orders, rounded to a whole percent.
    pub percentage: u32,
}

/// Order count for every product, in product-list order.
///
/// Orders referencing products outside the list count toward the
/// percentage base but get no entry of their own.
#[must_use]
pub fn product_sales(products: &[Product], orders: &[&Order]) -> Vec<ProductSales> {
    let mut counts: HashMap<&ProductId, usize> = HashMap::new();
    for order in orders {
        *counts.entry(&order.product_id).or_default() += 1;
    }

    let total = orders.len();
    products
        .iter()
        .map(|product| {
            let orders = counts.get(&product.id).copied().unwrap_or(0);
            ProductSales {
                product_id: product.id.clone(),
                name: product.name.clone(),
                orders,
                percentage: rounded_percent(orders, total),
            }
        })
        .collect()
}

/// A place in the best-selling ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    /// 1-based position.
    pub rank: usize,
    pub product_id: ProductId,
    pub name: String,
    pub orders: usize,
}

/// The `limit` best-selling products, most orders first. Products with the
/// same count keep their product-list order.
#[must_use]
pub fn top_products(sales: &[ProductSales], limit: usize) -> Vec<RankedProduct> {
    let mut ranked: Vec<&ProductSales> = sales.iter().collect();
    stable_sort_by(&mut ranked, |a, b| b.orders.cmp(&a.orders));

    ranked
        .into_iter()
        .take(limit)
        .zip(1..)
        .map(|(sale, rank)| RankedProduct {
            rank,
            product_id: sale.product_id.clone(),
            name: sale.name.clone(),
            orders: sale.orders,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use shop_admin_core::OrderStatus;

    use super::*;
    use crate::stats::TOP_PRODUCTS;
    use crate::table::rows::fixtures::{order, product};

    fn orders_for(counts: &[(&str, usize)]) -> Vec<Order> {
        counts
            .iter()
            .flat_map(|&(product_id, n)| {
                (0..n).map(move |i| order(&format!("{product_id}-{i}"), product_id, OrderStatus::Pending, None))
            })
            .collect()
    }

    #[test]
    fn test_ties_keep_product_order() {
        let products = vec![product("a", "A"), product("b", "B"), product("c", "C")];
        let orders = orders_for(&[("a", 2), ("b", 2), ("c", 5)]);
        let refs: Vec<&Order> = orders.iter().collect();

        let sales = product_sales(&products, &refs);
        let top = top_products(&sales, TOP_PRODUCTS);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[2].rank, 3);
    }

    #[test]
    fn test_ranking_is_truncated() {
        let products: Vec<Product> = (0..8).map(|i| product(&format!("p{i}"), &format!("P{i}"))).collect();
        let sales = product_sales(&products, &[]);
        let top = top_products(&sales, TOP_PRODUCTS);
        assert_eq!(top.len(), TOP_PRODUCTS);
        assert_eq!(top[0].name, "P0");
    }

    #[test]
    fn test_sales_percentages_include_unknown_products() {
        let products = vec![product("a", "A")];
        let orders = orders_for(&[("a", 1), ("gone", 3)]);
        let refs: Vec<&Order> = orders.iter().collect();

        let sales = product_sales(&products, &refs);
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].orders, 1);
        assert_eq!(sales[0].percentage, 25);
    }
}
