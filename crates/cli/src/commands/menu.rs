//! Menu listing.

use clap::ValueEnum;

use delicious_bites_storefront::state::AppState;
use delicious_bites_storefront::stores::{DietaryFilter, MenuQuery, MenuSort};

/// `--dietary` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DietaryArg {
    All,
    Vegetarian,
    NonVegetarian,
}

impl From<DietaryArg> for DietaryFilter {
    fn from(arg: DietaryArg) -> Self {
        match arg {
            DietaryArg::All => Self::All,
            DietaryArg::Vegetarian => Self::Vegetarian,
            DietaryArg::NonVegetarian => Self::NonVegetarian,
        }
    }
}

/// `--sort` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    PriceLow,
    PriceHigh,
    Popular,
}

impl From<SortArg> for MenuSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => Self::Name,
            SortArg::PriceLow => Self::PriceLow,
            SortArg::PriceHigh => Self::PriceHigh,
            SortArg::Popular => Self::Popular,
        }
    }
}

/// Assemble a menu query from command-line arguments.
pub fn build_query(
    search: String,
    category: Option<String>,
    dietary: DietaryArg,
    cuisine: Option<String>,
    sort: SortArg,
) -> MenuQuery {
    MenuQuery {
        search,
        category,
        dietary: dietary.into(),
        cuisine,
        sort: sort.into(),
    }
}

/// Log every item matching `query`.
pub async fn list(state: &AppState, query: &MenuQuery) {
    let items = state.catalog().query(query).await;

    tracing::info!("{} item(s)", items.len());
    for item in &items {
        let marker = if item.is_vegetarian { " (v)" } else { "" };
        tracing::info!(
            "  #{:<4} {:<28} {:>8}  {} / {}{marker}",
            item.id.to_string(),
            item.name,
            item.price.to_string(),
            item.category,
            item.cuisine,
        );
    }
}
