//! Table selections and the page they produce.

use serde::Serialize;

use super::{PageSize, SortConfig, TableRecord, filter, paginate, sort, total_pages};

/// One page of a filtered, sorted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<T> {
    pub items: Vec<T>,
    /// Rows matching the search, across all pages.
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub items_per_page: usize,
}

/// Search, sort and paging selections of a table.
///
/// Changing the search term, search field or page size returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState<S, O> {
    search_term: String,
    search_field: S,
    sort: Option<SortConfig<O>>,
    current_page: usize,
    page_size: PageSize,
}

impl<S, O> TableState<S, O>
where
    S: Copy + PartialEq,
    O: Copy + PartialEq,
{
    /// Unsorted, unfiltered state on page 1.
    #[must_use]
    pub fn new(search_field: S, page_size: PageSize) -> Self {
        Self {
            search_term: String::new(),
            search_field,
            sort: None,
            current_page: 1,
            page_size,
        }
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub const fn search_field(&self) -> S {
        self.search_field
    }

    #[must_use]
    pub const fn sort(&self) -> Option<SortConfig<O>> {
        self.sort
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    pub fn set_search_field(&mut self, field: S) {
        self.search_field = field;
        self.current_page = 1;
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.current_page = 1;
    }

    /// Header click on `field`: toggles direction on the same column,
    /// otherwise sorts the new column ascending.
    pub fn request_sort(&mut self, field: O) {
        self.sort = Some(SortConfig::request(self.sort, field));
    }

    /// Replace the sort outright (e.g. from a query string).
    pub fn set_sort(&mut self, sort: Option<SortConfig<O>>) {
        self.sort = sort;
    }

    pub const fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Pull the current page back to `total_pages` when it ran past the end.
    /// Does nothing for an empty table.
    pub fn clamp_page(&mut self, total_pages: usize) {
        if total_pages > 0 {
            self.current_page = self.current_page.min(total_pages);
        }
    }

    /// Filter, sort and paginate `records` with the current selections.
    #[must_use]
    pub fn view<R>(&self, records: &[R]) -> TablePage<R>
    where
        R: TableRecord<SearchField = S, SortField = O> + Clone,
    {
        let mut matched = filter(records, &self.search_term, self.search_field);
        if let Some(config) = self.sort {
            sort(&mut matched, config);
        }

        let total_items = matched.len();
        TablePage {
            items: paginate(&matched, self.current_page, self.page_size)
                .iter()
                .copied()
                .cloned()
                .collect(),
            total_items,
            total_pages: total_pages(total_items, self.page_size),
            current_page: self.current_page,
            items_per_page: self.page_size.get(),
        }
    }

    /// Like [`Self::view`], but first clamps a current page that ran past
    /// the last page of the filtered result.
    pub fn view_clamped<R>(&mut self, records: &[R]) -> TablePage<R>
    where
        R: TableRecord<SearchField = S, SortField = O> + Clone,
    {
        let page = self.view(records);
        if page.total_pages > 0 && self.current_page > page.total_pages {
            self.clamp_page(page.total_pages);
            return self.view(records);
        }
        page
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shop_admin_core::Product;

    use super::*;
    use crate::table::rows::fixtures::product;
    use crate::table::{ProductSearchField, ProductSortField, SortDirection};

    type ProductTable = TableState<ProductSearchField, ProductSortField>;

    fn products(n: usize) -> Vec<Product> {
        (0..n).map(|i| product(&format!("p{i}"), &format!("Item {i:02}"))).collect()
    }

    fn on_page(page: usize) -> ProductTable {
        let mut state = ProductTable::new(ProductSearchField::Name, PageSize::new(5).unwrap());
        state.go_to_page(page);
        state
    }

    #[test]
    fn test_changes_reset_to_first_page() {
        let mut state = on_page(3);
        state.set_search_term("item");
        assert_eq!(state.current_page(), 1);

        state.go_to_page(3);
        state.set_search_field(ProductSearchField::Description);
        assert_eq!(state.current_page(), 1);

        state.go_to_page(3);
        state.set_page_size(PageSize::new(20).unwrap());
        assert_eq!(state.current_page(), 1);

        state.go_to_page(3);
        state.request_sort(ProductSortField::Name);
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn test_request_sort_toggles() {
        let mut state = on_page(1);
        state.request_sort(ProductSortField::Price);
        state.request_sort(ProductSortField::Price);
        assert_eq!(state.sort().unwrap().direction, SortDirection::Desc);
        state.request_sort(ProductSortField::Name);
        assert_eq!(state.sort(), Some(SortConfig::asc(ProductSortField::Name)));
    }

    #[test]
    fn test_view_reports_totals() {
        let records = products(12);
        let mut state = on_page(3);
        state.request_sort(ProductSortField::Name);
        state.request_sort(ProductSortField::Name);

        let page = state.view(&records);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items_per_page, 5);
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Item 01", "Item 00"]);
    }

    #[test]
    fn test_page_past_end_is_empty_until_clamped() {
        let records = products(7);
        let mut state = on_page(4);
        assert!(state.view(&records).items.is_empty());

        let page = state.view_clamped(&records);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_clamp_ignores_empty_tables() {
        let mut state = on_page(4);
        state.clamp_page(0);
        assert_eq!(state.current_page(), 4);
        let empty: Vec<Product> = Vec::new();
        let page = state.view_clamped(&empty);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
