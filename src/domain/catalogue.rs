//! Filtering and pagination over the catalogue grid.
//!
//! The view state owns the search query, the selected category filter, and
//! the current page index, and derives the visible slice of an immutable
//! item list supplied by the infrastructure loader. It is a pure function
//! of its state plus the input list: no network, no persistence, no clock.

use super::models::CatalogueItem;

/// Items shown per catalogue page.
pub const PAGE_SIZE: usize = 20;

/// Sentinel category label matching every item.
pub const ALL_CATEGORIES: &str = "all";

/// Ephemeral view state for the catalogue page.
///
/// Created fresh on every visit to the page and discarded on navigation
/// away; nothing here is persisted.
///
/// # Examples
///
/// ```
/// use tuidex::domain::{CatalogueView, ALL_CATEGORIES};
///
/// let view = CatalogueView::default();
/// assert_eq!(view.query, "");
/// assert_eq!(view.category, ALL_CATEGORIES);
/// assert_eq!(view.page, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueView {
    /// Free-text search, matched case-insensitively against item names.
    pub query: String,
    /// Selected category label, or [`ALL_CATEGORIES`].
    pub category: String,
    /// Current page, 1-based.
    pub page: usize,
}

impl Default for CatalogueView {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            page: 1,
        }
    }
}

/// Result of deriving the visible page from a view state and an item list.
#[derive(Debug, Clone, PartialEq)]
pub struct CataloguePage<'a> {
    /// The items on the current page, in input order. May be empty.
    pub visible: Vec<&'a CatalogueItem>,
    /// Total page count over the filtered list, always at least 1.
    pub total_pages: usize,
}

impl CatalogueView {
    /// Updates the search query and resets the page to 1.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        self.page = 1;
    }

    /// Updates the category filter and resets the page to 1.
    pub fn set_category(&mut self, label: &str) {
        self.category = label.to_string();
        self.page = 1;
    }

    /// Sets the page index.
    ///
    /// Callers must keep `page` within `[1, total_pages]`; navigation
    /// controls are disabled at the boundaries and no clamping happens
    /// here.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Returns the slice of `items` visible on the current page and the
    /// total page count.
    ///
    /// Filtering is a case-insensitive substring match of the query
    /// against item names, combined with the category filter. The visible
    /// slice is `[(page - 1) * 20, page * 20)` of the filtered list.
    ///
    /// # Examples
    ///
    /// ```
    /// use tuidex::domain::{CatalogueItem, CatalogueView};
    ///
    /// let items = vec![CatalogueItem {
    ///     id: 1,
    ///     name: "bulbasaur".to_string(),
    ///     image_url: String::new(),
    ///     categories: vec!["grass".to_string(), "poison".to_string()],
    ///     height_dm: 7,
    ///     weight_hg: 69,
    ///     abilities: vec![],
    /// }];
    ///
    /// let mut view = CatalogueView::default();
    /// view.set_query("BULBA");
    /// let page = view.derive(&items);
    /// assert_eq!(page.visible.len(), 1);
    /// assert_eq!(page.total_pages, 1);
    /// ```
    pub fn derive<'a>(&self, items: &'a [CatalogueItem]) -> CataloguePage<'a> {
        let query = self.query.to_lowercase();

        let filtered: Vec<&CatalogueItem> = items
            .iter()
            .filter(|item| {
                let matches_name = item.name.to_lowercase().contains(&query);
                let matches_category = self.category == ALL_CATEGORIES
                    || item.categories.iter().any(|c| *c == self.category);
                matches_name && matches_category
            })
            .collect();

        let total_pages = filtered.len().div_ceil(PAGE_SIZE).max(1);

        let start = (self.page - 1) * PAGE_SIZE;
        let visible = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();

        CataloguePage {
            visible,
            total_pages,
        }
    }
}

/// Returns every category label present across `items`, prefixed with the
/// [`ALL_CATEGORIES`] sentinel, in order of first occurrence.
///
/// Used to populate the category selection control; the ordering is not
/// stable across different input lists, which is fine for a dropdown.
pub fn distinct_categories(items: &[CatalogueItem]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        for category in &item.categories {
            if !labels.iter().any(|l| l == category) {
                labels.push(category.clone());
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, name: &str, categories: &[&str]) -> CatalogueItem {
        CatalogueItem {
            id,
            name: name.to_string(),
            image_url: format!("https://img.example/{}.png", id),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            height_dm: 0,
            weight_hg: 0,
            abilities: vec![],
        }
    }

    fn sample() -> Vec<CatalogueItem> {
        vec![
            item(1, "bulbasaur", &["grass", "poison"]),
            item(4, "charmander", &["fire"]),
            item(7, "squirtle", &["water"]),
            item(25, "pikachu", &["electric"]),
            item(59, "arcanine", &["fire"]),
        ]
    }

    #[test]
    fn test_query_matches_case_insensitive_substring() {
        let items = sample();
        let mut view = CatalogueView::default();
        view.set_query("CHAR");

        let page = view.derive(&items);
        assert_eq!(page.visible.len(), 1);
        assert_eq!(page.visible[0].name, "charmander");
    }

    #[test]
    fn test_every_visible_item_contains_query() {
        let items = sample();
        let mut view = CatalogueView::default();
        view.set_query("a");

        let page = view.derive(&items);
        assert!(!page.visible.is_empty());
        for item in page.visible {
            assert!(item.name.to_lowercase().contains("a"));
        }
    }

    #[test]
    fn test_category_filter_requires_membership() {
        let items = sample();
        let mut view = CatalogueView::default();
        view.set_category("fire");

        let page = view.derive(&items);
        assert_eq!(page.visible.len(), 2);
        for item in page.visible {
            assert!(item.categories.iter().any(|c| c == "fire"));
        }
    }

    #[test]
    fn test_all_category_matches_everything() {
        let items = sample();
        let view = CatalogueView::default();

        let page = view.derive(&items);
        assert_eq!(page.visible.len(), items.len());
    }

    #[test]
    fn test_query_and_category_combine() {
        let items = sample();
        let mut view = CatalogueView::default();
        view.set_category("fire");
        view.set_query("arc");

        let page = view.derive(&items);
        assert_eq!(page.visible.len(), 1);
        assert_eq!(page.visible[0].name, "arcanine");
    }

    #[test]
    fn test_set_query_resets_page() {
        let mut view = CatalogueView::default();
        view.set_page(3);
        view.set_query("bulba");
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_set_category_resets_page() {
        let mut view = CatalogueView::default();
        view.set_page(2);
        view.set_category("water");
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_total_pages_is_at_least_one_when_empty() {
        let items = sample();
        let mut view = CatalogueView::default();
        view.set_query("no such pokemon");

        let page = view.derive(&items);
        assert!(page.visible.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_pagination_slices_twenty_per_page() {
        let items: Vec<CatalogueItem> = (1..=45)
            .map(|i| item(i, &format!("mon-{:03}", i), &["normal"]))
            .collect();
        let mut view = CatalogueView::default();

        let page = view.derive(&items);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.visible.len(), 20);
        assert_eq!(page.visible[0].id, 1);

        view.set_page(3);
        let page = view.derive(&items);
        assert_eq!(page.visible.len(), 5);
        assert_eq!(page.visible[0].id, 41);
        assert_eq!(page.visible[4].id, 45);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let items: Vec<CatalogueItem> = (1..=40)
            .map(|i| item(i, &format!("mon-{:03}", i), &["normal"]))
            .collect();
        let view = CatalogueView::default();

        assert_eq!(view.derive(&items).total_pages, 2);
    }

    #[test]
    fn test_distinct_categories_starts_with_all_sentinel() {
        let items = sample();
        let labels = distinct_categories(&items);
        assert_eq!(labels[0], ALL_CATEGORIES);
    }

    #[test]
    fn test_distinct_categories_first_occurrence_order() {
        let items = sample();
        let labels = distinct_categories(&items);
        assert_eq!(
            labels,
            vec!["all", "grass", "poison", "fire", "water", "electric"]
        );
    }

    #[test]
    fn test_distinct_categories_empty_input() {
        let labels = distinct_categories(&[]);
        assert_eq!(labels, vec![ALL_CATEGORIES.to_string()]);
    }
}
