//! Typed menu filters and sorting.
//!
//! Explicit predicates over [`MenuItem`] fields, applied in memory to the
//! pre-loaded catalog slice.

use crate::menu::MenuItem;
use crate::money::Money;
use std::cmp::Ordering;

/// Dietary preference filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dietary {
    /// No dietary restriction.
    #[default]
    All,
    /// Vegetarian dishes only.
    Veg,
    /// Non-vegetarian dishes only.
    NonVeg,
}

/// A menu filter.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuFilter {
    /// Filter by category name.
    Category(String),
    /// Keyword search over name and blurb, case-insensitive.
    Search(String),
    /// Filter by dietary preference.
    Dietary(Dietary),
    /// Filter by base price range (inclusive).
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
}

impl MenuFilter {
    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        MenuFilter::Category(name.into())
    }

    /// Create a keyword search filter.
    pub fn search(query: impl Into<String>) -> Self {
        MenuFilter::Search(query.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        MenuFilter::PriceRange { min, max }
    }

    /// Check whether an item passes this filter.
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            MenuFilter::Category(category) => item.category == *category,
            MenuFilter::Search(query) => {
                let query = query.trim().to_lowercase();
                if query.is_empty() {
                    return true;
                }
                item.name.to_lowercase().contains(&query)
                    || item
                        .short
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
            }
            MenuFilter::Dietary(Dietary::All) => true,
            MenuFilter::Dietary(Dietary::Veg) => item.veg,
            MenuFilter::Dietary(Dietary::NonVeg) => !item.veg,
            MenuFilter::PriceRange { min, max } => {
                if let Some(min) = min {
                    if item.price < *min {
                        return false;
                    }
                }
                if let Some(max) = max {
                    if item.price > *max {
                        return false;
                    }
                }
                true
            }
        }
    }
}

/// Sort order for the menu listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Highest rated first.
    Rating,
    /// Popular dishes first, then by rating.
    #[default]
    Popularity,
}

impl SortBy {
    /// Compare two items under this ordering.
    pub fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self {
            SortBy::PriceAsc => a.price.cmp(&b.price),
            SortBy::PriceDesc => b.price.cmp(&a.price),
            SortBy::Rating => cmp_rating(a, b),
            SortBy::Popularity => b
                .popular
                .cmp(&a.popular)
                .then_with(|| cmp_rating(a, b)),
        }
    }
}

fn cmp_rating(a: &MenuItem, b: &MenuItem) -> Ordering {
    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
}

/// Apply filters and an optional sort to a catalog slice.
///
/// All filters must match (AND). Sorting is stable, so catalog order
/// breaks ties.
pub fn filter_menu<'a>(
    items: &'a [MenuItem],
    filters: &[MenuFilter],
    sort: Option<SortBy>,
) -> Vec<&'a MenuItem> {
    let mut result: Vec<&MenuItem> = items
        .iter()
        .filter(|item| filters.iter().all(|f| f.matches(item)))
        .collect();

    if let Some(sort) = sort {
        result.sort_by(|a, b| sort.compare(a, b));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<MenuItem> {
        let mut pizza = MenuItem::new("m1", "Margherita Pizza", "Pizza", Money::from_rupees(299));
        pizza.veg = true;
        pizza.rating = 4.6;
        pizza.popular = true;
        pizza.short = Some("Classic wood-fired pizza".to_string());

        let mut tikka = MenuItem::new("m2", "Chicken Tikka", "Starters", Money::from_rupees(259));
        tikka.rating = 4.8;

        let mut dal = MenuItem::new("m3", "Dal Makhani", "Mains", Money::from_rupees(199));
        dal.veg = true;
        dal.rating = 4.2;

        vec![pizza, tikka, dal]
    }

    #[test]
    fn test_category_filter() {
        let items = catalog();
        let result = filter_menu(&items, &[MenuFilter::category("Pizza")], None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Margherita Pizza");
    }

    #[test]
    fn test_search_matches_name_and_blurb() {
        let items = catalog();
        assert_eq!(filter_menu(&items, &[MenuFilter::search("tikka")], None).len(), 1);
        assert_eq!(
            filter_menu(&items, &[MenuFilter::search("wood-fired")], None).len(),
            1
        );
        // Blank query matches everything
        assert_eq!(filter_menu(&items, &[MenuFilter::search("  ")], None).len(), 3);
    }

    #[test]
    fn test_dietary_filter() {
        let items = catalog();
        assert_eq!(
            filter_menu(&items, &[MenuFilter::Dietary(Dietary::Veg)], None).len(),
            2
        );
        assert_eq!(
            filter_menu(&items, &[MenuFilter::Dietary(Dietary::NonVeg)], None).len(),
            1
        );
    }

    #[test]
    fn test_price_range_filter() {
        let items = catalog();
        let result = filter_menu(
            &items,
            &[MenuFilter::price_range(
                Some(Money::from_rupees(200)),
                Some(Money::from_rupees(280)),
            )],
            None,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Chicken Tikka");
    }

    #[test]
    fn test_filters_combine_with_and() {
        let items = catalog();
        let result = filter_menu(
            &items,
            &[
                MenuFilter::Dietary(Dietary::Veg),
                MenuFilter::price_range(None, Some(Money::from_rupees(250))),
            ],
            None,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Dal Makhani");
    }

    #[test]
    fn test_sort_by_price() {
        let items = catalog();
        let result = filter_menu(&items, &[], Some(SortBy::PriceAsc));
        let names: Vec<_> = result.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Dal Makhani", "Chicken Tikka", "Margherita Pizza"]);
    }

    #[test]
    fn test_sort_by_popularity_puts_popular_first() {
        let items = catalog();
        let result = filter_menu(&items, &[], Some(SortBy::Popularity));
        assert_eq!(result[0].name, "Margherita Pizza");
        // Remaining items fall back to rating order
        assert_eq!(result[1].name, "Chicken Tikka");
    }
}
