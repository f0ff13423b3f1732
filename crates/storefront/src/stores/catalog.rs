//! Catalog store: the menu.

use std::cmp::Ordering;

use serde::Deserialize;
use tokio::sync::RwLock;

use delicious_bites_core::MenuItemId;

use crate::latency::Latency;
use crate::models::{MenuItem, MenuItemDraft};
use crate::seed;

/// Menu state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
    categories: Vec<String>,
    loading: bool,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            categories: Vec::new(),
            loading: true,
        }
    }
}

/// Mutations of [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCommand {
    Loaded {
        items: Vec<MenuItem>,
        categories: Vec<String>,
    },
    SetLoading(bool),
    Added(MenuItem),
    /// Full replace by ID. No-op if the ID is absent.
    Updated(MenuItem),
    /// No-op if the ID is absent.
    Deleted(MenuItemId),
}

impl Catalog {
    /// Apply a command.
    pub fn apply(&mut self, command: CatalogCommand) {
        match command {
            CatalogCommand::Loaded { items, categories } => {
                self.items = items;
                self.categories = categories;
                self.loading = false;
            }
            CatalogCommand::SetLoading(loading) => self.loading = loading,
            CatalogCommand::Added(item) => {
                if self.get(item.id).is_some() {
                    tracing::warn!(item_id = %item.id, "Ignoring menu item with duplicate id");
                    return;
                }
                self.items.push(item);
            }
            CatalogCommand::Updated(item) => {
                if let Some(slot) = self.items.iter_mut().find(|existing| existing.id == item.id) {
                    *slot = item;
                }
            }
            CatalogCommand::Deleted(id) => self.items.retain(|item| item.id != id),
        }
    }

    /// All items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Category filter values, starting with `All`.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns `true` until the first load completes.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items matching `query`, in the order it asks for.
    #[must_use]
    pub fn query(&self, query: &MenuQuery) -> Vec<&MenuItem> {
        let mut matches: Vec<&MenuItem> = self
            .items
            .iter()
            .filter(|item| query.matches(item))
            .collect();
        matches.sort_by(|a, b| query.sort.compare(a, b));
        matches
    }

    fn fresh_id(&self, now_millis: i64) -> MenuItemId {
        MenuItemId::new(super::fresh_id(
            now_millis,
            self.items.iter().map(|item| item.id.as_i64()),
        ))
    }
}

// =============================================================================
// Menu browsing
// =============================================================================

/// Vegetarian filter on the menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryFilter {
    #[default]
    All,
    Vegetarian,
    NonVegetarian,
}

/// Sort order on the menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuSort {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    /// Popular items first, otherwise in menu order.
    Popular,
}

impl MenuSort {
    fn compare(self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Popular => b.is_popular.cmp(&a.is_popular),
        }
    }
}

/// Search, filter and sort options for the menu page.
///
/// `category` and `cuisine` accept `All` (or nothing) to match every item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuQuery {
    /// Case-insensitive substring of the name or description.
    pub search: String,
    pub category: Option<String>,
    pub dietary: DietaryFilter,
    pub cuisine: Option<String>,
    pub sort: MenuSort,
}

fn selects(filter: Option<&str>, value: &str) -> bool {
    match filter {
        None | Some(seed::ALL) | Some("") => true,
        Some(wanted) => wanted == value,
    }
}

impl MenuQuery {
    /// Returns `true` if `item` passes every filter.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle);

        let matches_dietary = match self.dietary {
            DietaryFilter::All => true,
            DietaryFilter::Vegetarian => item.is_vegetarian,
            DietaryFilter::NonVegetarian => !item.is_vegetarian,
        };

        matches_search
            && matches_dietary
            && selects(self.category.as_deref(), &item.category)
            && selects(self.cuisine.as_deref(), &item.cuisine)
    }
}

// =============================================================================
// Store handle
// =============================================================================

/// Handle to the menu.
#[derive(Debug)]
pub struct CatalogStore {
    state: RwLock<Catalog>,
    latency: Latency,
}

impl CatalogStore {
    /// Create an empty, loading catalog. Call [`load`](Self::load) once at
    /// startup.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self {
            state: RwLock::new(Catalog::default()),
            latency,
        }
    }

    /// Populate the menu from the static dataset after the simulated delay.
    pub async fn load(&self) {
        self.dispatch(CatalogCommand::SetLoading(true)).await;
        self.latency.wait().await;

        let items = seed::menu_items();
        tracing::info!(items = items.len(), "Menu loaded");
        self.dispatch(CatalogCommand::Loaded {
            items,
            categories: seed::categories(),
        })
        .await;
    }

    /// Apply a command under the write lock.
    pub async fn dispatch(&self, command: CatalogCommand) {
        self.state.write().await.apply(command);
    }

    /// Copy of the current menu.
    pub async fn snapshot(&self) -> Catalog {
        self.state.read().await.clone()
    }

    /// Look up an item by ID.
    pub async fn get(&self, id: MenuItemId) -> Option<MenuItem> {
        self.state.read().await.get(id).cloned()
    }

    /// Items matching `query`.
    pub async fn query(&self, query: &MenuQuery) -> Vec<MenuItem> {
        self.state
            .read()
            .await
            .query(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Add an item with a newly assigned ID.
    pub async fn add_item(&self, draft: MenuItemDraft) -> MenuItem {
        let mut state = self.state.write().await;
        let id = state.fresh_id(chrono::Utc::now().timestamp_millis());
        let item = draft.into_item(id);
        state.apply(CatalogCommand::Added(item.clone()));
        drop(state);

        tracing::info!(item_id = %item.id, name = %item.name, "Menu item added");
        item
    }

    /// Replace the item with the same ID. Returns `false` (and changes
    /// nothing) if no such item exists.
    pub async fn update_item(&self, item: MenuItem) -> bool {
        let mut state = self.state.write().await;
        let id = item.id;
        let found = state.get(id).is_some();
        state.apply(CatalogCommand::Updated(item));
        drop(state);

        if found {
            tracing::info!(item_id = %id, "Menu item updated");
        } else {
            tracing::debug!(item_id = %id, "Update ignored for unknown menu item");
        }
        found
    }

    /// Remove an item. Returns `false` if no such item exists.
    ///
    /// Cart lines referencing the item are left alone.
    pub async fn delete_item(&self, id: MenuItemId) -> bool {
        let mut state = self.state.write().await;
        let found = state.get(id).is_some();
        state.apply(CatalogCommand::Deleted(id));
        drop(state);

        if found {
            tracing::info!(item_id = %id, "Menu item deleted");
        }
        found
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use delicious_bites_core::Money;

    fn loaded() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.apply(CatalogCommand::Loaded {
            items: seed::menu_items(),
            categories: seed::categories(),
        });
        catalog
    }

    fn names(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|item| item.name.clone()).collect()
    }

    fn draft(name: &str) -> MenuItemDraft {
        MenuItemDraft {
            name: name.to_owned(),
            description: String::new(),
            price: Money::from_cents(500),
            category: "Desserts".to_owned(),
            cuisine: "International".to_owned(),
            image: None,
            is_vegetarian: true,
            is_popular: false,
        }
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut catalog = loaded();
        let before = catalog.clone();
        let mut ghost = catalog.items()[0].clone();
        ghost.id = MenuItemId::new(999);
        catalog.apply(CatalogCommand::Updated(ghost));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_update_replaces_whole_item() {
        let mut catalog = loaded();
        let mut pizza = catalog.get(MenuItemId::new(1)).unwrap().clone();
        pizza.price = Money::from_cents(1399);
        pizza.is_popular = false;
        catalog.apply(CatalogCommand::Updated(pizza.clone()));
        assert_eq!(catalog.get(MenuItemId::new(1)), Some(&pizza));
        assert_eq!(catalog.items().len(), 8);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut catalog = loaded();
        catalog.apply(CatalogCommand::Deleted(MenuItemId::new(999)));
        assert_eq!(catalog.items().len(), 8);
        catalog.apply(CatalogCommand::Deleted(MenuItemId::new(3)));
        assert_eq!(catalog.items().len(), 7);
        assert!(catalog.get(MenuItemId::new(3)).is_none());
    }

    #[test]
    fn test_added_duplicate_id_is_ignored() {
        let mut catalog = loaded();
        let copy = catalog.items()[0].clone();
        catalog.apply(CatalogCommand::Added(copy));
        assert_eq!(catalog.items().len(), 8);
    }

    #[test]
    fn test_query_search_matches_description() {
        let catalog = loaded();
        let query = MenuQuery {
            search: "AVOCADO".to_owned(),
            ..MenuQuery::default()
        };
        assert_eq!(
            names(&catalog.query(&query)),
            vec!["Fish Tacos", "Sushi Roll"]
        );
    }

    #[test]
    fn test_query_filters_compose() {
        let catalog = loaded();
        let query = MenuQuery {
            cuisine: Some("Italian".to_owned()),
            dietary: DietaryFilter::Vegetarian,
            category: Some("Pasta".to_owned()),
            ..MenuQuery::default()
        };
        assert_eq!(names(&catalog.query(&query)), vec!["Vegetable Pasta"]);
    }

    #[test]
    fn test_query_all_category_matches_everything() {
        let catalog = loaded();
        let query = MenuQuery {
            category: Some("All".to_owned()),
            ..MenuQuery::default()
        };
        assert_eq!(catalog.query(&query).len(), 8);
    }

    #[test]
    fn test_query_non_vegetarian() {
        let catalog = loaded();
        let query = MenuQuery {
            dietary: DietaryFilter::NonVegetarian,
            ..MenuQuery::default()
        };
        assert!(catalog.query(&query).iter().all(|item| !item.is_vegetarian));
        assert_eq!(catalog.query(&query).len(), 4);
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = loaded();
        let low = catalog.query(&MenuQuery {
            sort: MenuSort::PriceLow,
            ..MenuQuery::default()
        });
        assert_eq!(low.first().unwrap().name, "Chocolate Cake");
        assert_eq!(low.last().unwrap().name, "Chicken Tikka Masala");

        let high = catalog.query(&MenuQuery {
            sort: MenuSort::PriceHigh,
            ..MenuQuery::default()
        });
        assert_eq!(high.first().unwrap().name, "Chicken Tikka Masala");
    }

    #[test]
    fn test_sort_popular_is_stable() {
        let catalog = loaded();
        let popular = catalog.query(&MenuQuery {
            sort: MenuSort::Popular,
            ..MenuQuery::default()
        });
        assert_eq!(
            names(&popular[..4]),
            vec![
                "Margherita Pizza",
                "Chicken Tikka Masala",
                "Beef Burger",
                "Sushi Roll"
            ]
        );
    }

    #[test]
    fn test_sort_by_name_is_default() {
        let catalog = loaded();
        let sorted = catalog.query(&MenuQuery::default());
        assert_eq!(sorted.first().unwrap().name, "Beef Burger");
        assert_eq!(sorted.last().unwrap().name, "Vegetable Pasta");
    }

    #[test]
    fn test_query_deserializes_kebab_case() {
        let query: MenuQuery =
            serde_json::from_str(r#"{"dietary":"non-vegetarian","sort":"price-high"}"#).unwrap();
        assert_eq!(query.dietary, DietaryFilter::NonVegetarian);
        assert_eq!(query.sort, MenuSort::PriceHigh);
        assert!(query.search.is_empty());
    }

    #[tokio::test]
    async fn test_load_populates_and_clears_loading() {
        let store = CatalogStore::new(Latency::NONE);
        assert!(store.snapshot().await.is_loading());
        store.load().await;
        let catalog = store.snapshot().await;
        assert!(!catalog.is_loading());
        assert_eq!(catalog.items().len(), 8);
        assert_eq!(catalog.categories().first().map(String::as_str), Some("All"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_waits_for_latency() {
        let store = CatalogStore::new(Latency::from_millis(1000));
        let start = tokio::time::Instant::now();
        store.load().await;
        assert_eq!(start.elapsed(), std::time::Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_add_item_assigns_unique_ids() {
        let store = CatalogStore::new(Latency::NONE);
        store.load().await;

        let first = store.add_item(draft("Tiramisu")).await;
        let second = store.add_item(draft("Panna Cotta")).await;

        assert_ne!(first.id, second.id);
        assert!(first.id > MenuItemId::new(8));
        assert_eq!(store.get(second.id).await.unwrap().name, "Panna Cotta");
        assert_eq!(store.snapshot().await.items().len(), 10);
    }

    #[tokio::test]
    async fn test_update_and_delete_report_presence() {
        let store = CatalogStore::new(Latency::NONE);
        store.load().await;

        let mut salad = store.get(MenuItemId::new(3)).await.unwrap();
        salad.name = "Chicken Caesar Salad".to_owned();
        assert!(store.update_item(salad).await);

        let mut ghost = store.get(MenuItemId::new(3)).await.unwrap();
        ghost.id = MenuItemId::new(404);
        assert!(!store.update_item(ghost).await);

        assert!(store.delete_item(MenuItemId::new(3)).await);
        assert!(!store.delete_item(MenuItemId::new(3)).await);
    }
}
