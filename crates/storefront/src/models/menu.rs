//! Menu item records.

use serde::{Deserialize, Serialize};

use delicious_bites_core::{MenuItemId, Money};

/// Image used when an item is added without one.
pub const DEFAULT_IMAGE: &str =
    "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=500";

/// A purchasable dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub cuisine: String,
    pub image: String,
    pub is_vegetarian: bool,
    pub is_popular: bool,
}

/// A menu item as entered on the admin form, before it has an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_popular: bool,
}

impl MenuItemDraft {
    /// Attach an ID, falling back to the default image.
    #[must_use]
    pub fn into_item(self, id: MenuItemId) -> MenuItem {
        let image = self
            .image
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_owned());

        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            cuisine: self.cuisine,
            image,
            is_vegetarian: self.is_vegetarian,
            is_popular: self.is_popular,
        }
    }
}
