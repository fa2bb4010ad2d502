//! `products` and `orders` subcommands.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clap::Args;
use clap::builder::RangedU64ValueParser;
use shop_admin::table::{
    OrderRow, OrderSearchField, OrderSortField, PageSize, ProductSearchField, ProductSortField, SortConfig,
    SortDirection, TableColumn, TablePage, TableState, order_layout, product_layout,
};
use shop_admin_core::Product;

use super::{CliError, connect, wire_name, write_table};

/// Search and paging options shared by both tables.
#[derive(Debug, Args)]
pub struct PageArgs {
    /// Case-insensitive search term
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort direction (`asc` or `desc`)
    #[arg(long, default_value = "asc", value_parser = wire_name::<SortDirection>)]
    pub dir: SortDirection,

    /// Page number, starting at 1
    #[arg(long, default_value = "1", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub page: usize,

    /// Rows per page (5, 10, 20, 50 or 100)
    #[arg(long, default_value = "10", value_parser = parse_page_size)]
    pub per_page: PageSize,
}

impl PageArgs {
    fn state<S, O>(&self, field: S, sort: Option<O>) -> TableState<S, O>
    where
        S: Copy + PartialEq,
        O: Copy + PartialEq,
    {
        let mut state = TableState::new(field, self.per_page);
        state.set_search_term(self.search.trim());
        state.set_sort(sort.map(|field| SortConfig {
            field,
            direction: self.dir,
        }));
        state.go_to_page(self.page);
        state
    }
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    raw.parse::<usize>()
        .map_err(|e| e.to_string())
        .and_then(PageSize::try_from)
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Field the search applies to (`name`, `description`, `price`, `quantity`)
    #[arg(short, long, default_value = "name", value_parser = wire_name::<ProductSearchField>)]
    pub field: ProductSearchField,

    /// Column to sort on (`name`, `price`, `quantity`, `createdAt`, `updatedAt`)
    #[arg(long, value_parser = wire_name::<ProductSortField>)]
    pub sort: Option<ProductSortField>,
}

#[derive(Debug, Args)]
pub struct OrderArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Field the search applies to (`customerName`, `customerEmail`, `status`, `productName`)
    #[arg(short, long, default_value = "customerName", value_parser = wire_name::<OrderSearchField>)]
    pub field: OrderSearchField,

    /// Column to sort on (`productName`, `quantity`, `customerName`, `customerEmail`,
    /// `status`, `createdAt`, `updatedAt`)
    #[arg(long, value_parser = wire_name::<OrderSortField>)]
    pub sort: Option<OrderSortField>,
}

/// Print one page of the product table.
///
/// # Errors
///
/// Returns `CliError` if the store is unreachable or output fails.
pub async fn products(args: ProductArgs) -> Result<(), CliError> {
    let store = connect()?;
    let products = store.fetch_products().await?;
    tracing::debug!(count = products.len(), "Fetched products");

    let page = args.page.state(args.field, args.sort).view_clamped(&products);
    print_page(&product_layout().columns, &page, product_cell)?;
    Ok(())
}

/// Print one page of the order table, joined with product names.
///
/// # Errors
///
/// Returns `CliError` if the store is unreachable or output fails.
pub async fn orders(args: OrderArgs) -> Result<(), CliError> {
    let store = connect()?;
    let (products, orders) = tokio::try_join!(store.fetch_products(), store.fetch_orders())?;
    tracing::debug!(products = products.len(), orders = orders.len(), "Fetched collections");

    let rows = OrderRow::join(&orders, &products);
    let page = args.page.state(args.field, args.sort).view_clamped(&rows);
    print_page(&order_layout().columns, &page, order_cell)?;
    Ok(())
}

fn print_page<R, F>(columns: &[TableColumn<F>], page: &TablePage<R>, cell: fn(&R, &str) -> String) -> io::Result<()> {
    let headers: Vec<&str> = columns.iter().map(|c| c.label).collect();
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|item| columns.iter().map(|c| cell(item, c.key)).collect())
        .collect();

    let mut out = io::stdout().lock();
    write_table(&mut out, &headers, &rows)?;
    write_footer(&mut out, page)
}

fn write_footer<R>(out: &mut impl Write, page: &TablePage<R>) -> io::Result<()> {
    if page.total_items == 0 {
        return writeln!(out, "\nNo matching rows");
    }
    writeln!(
        out,
        "\nPage {} of {} ({} rows)",
        page.current_page, page.total_pages, page.total_items
    )
}

fn product_cell(product: &Product, key: &str) -> String {
    match key {
        "name" => product.name.clone(),
        "price" => format!("{:.2}", product.price),
        "description" => product.description.clone(),
        "quantity" => product.quantity.to_string(),
        "createdAt" => date_cell(product.created_at),
        "updatedAt" => date_cell(product.updated_at),
        _ => String::new(),
    }
}

fn order_cell(row: &OrderRow, key: &str) -> String {
    let order = &row.order;
    match key {
        "productName" => row.product_name.clone(),
        "quantity" => order.quantity.to_string(),
        "customerName" => order.customer_name.clone(),
        "customerEmail" => order.customer_email.clone(),
        "status" => order.status.to_string(),
        "createdAt" => date_cell(order.created_at),
        "updatedAt" => date_cell(order.updated_at),
        _ => String::new(),
    }
}

fn date_cell(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string())
}
