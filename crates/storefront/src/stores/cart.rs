//! Cart store: the shopper's selections.

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard, RwLock};

use delicious_bites_core::{MenuItemId, Money};

use crate::models::{MenuItem, OrderLine};

/// Largest quantity a single cart line holds.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// The part of a menu item a cart line keeps.
///
/// Price is captured when the item is first added; later menu edits do not
/// reprice lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub item_id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub image: String,
}

impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

/// One line of the cart. Quantity is between 1 and [`MAX_LINE_QUANTITY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// Snapshot this line for an order.
    #[must_use]
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// Mutations of [`Cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one of the item, merging with an existing line.
    Add(CartItem),
    Remove(MenuItemId),
    /// Set a line's quantity. Zero or less removes the line; an unknown ID
    /// is a no-op.
    UpdateQuantity { item_id: MenuItemId, quantity: i64 },
    /// Take ordered quantities off their lines, dropping lines that reach
    /// zero. Units added after the order was snapshotted stay.
    RemoveOrdered(Vec<(MenuItemId, u32)>),
    Clear,
}

/// The cart. At most one line per menu item, in first-added order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Apply a command.
    pub fn apply(&mut self, command: CartCommand) {
        match command {
            CartCommand::Add(item) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.item_id) {
                    line.quantity = line.quantity.saturating_add(1).min(MAX_LINE_QUANTITY);
                } else {
                    self.lines.push(CartLine {
                        item_id: item.item_id,
                        name: item.name,
                        price: item.price,
                        image: item.image,
                        quantity: 1,
                    });
                }
            }
            CartCommand::Remove(item_id) => self.lines.retain(|l| l.item_id != item_id),
            CartCommand::UpdateQuantity { item_id, quantity } => {
                if quantity <= 0 {
                    self.lines.retain(|l| l.item_id != item_id);
                } else if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
                    line.quantity = u32::try_from(quantity)
                        .unwrap_or(u32::MAX)
                        .min(MAX_LINE_QUANTITY);
                }
            }
            CartCommand::RemoveOrdered(ordered) => {
                for (item_id, quantity) in ordered {
                    if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
                        line.quantity = line.quantity.saturating_sub(quantity);
                    }
                }
                self.lines.retain(|l| l.quantity > 0);
            }
            CartCommand::Clear => self.lines.clear(),
        }
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for `item_id`, if present.
    #[must_use]
    pub fn line(&self, item_id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Snapshot every line for an order.
    #[must_use]
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(CartLine::to_order_line).collect()
    }

    /// Item and quantity of every line, for [`CartCommand::RemoveOrdered`].
    #[must_use]
    pub fn quantities(&self) -> Vec<(MenuItemId, u32)> {
        self.lines.iter().map(|l| (l.item_id, l.quantity)).collect()
    }
}

/// Handle to the cart.
///
/// The write lock is held only while a command applies. A separate checkout
/// lock admits one checkout at a time.
#[derive(Debug, Default)]
pub struct CartStore {
    state: RwLock<Cart>,
    checkout: Mutex<()>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command under the write lock and return the resulting cart.
    pub async fn dispatch(&self, command: CartCommand) -> Cart {
        let mut cart = self.state.write().await;
        cart.apply(command);
        cart.clone()
    }

    pub async fn snapshot(&self) -> Cart {
        self.state.read().await.clone()
    }

    pub async fn add_item(&self, item: &MenuItem) -> Cart {
        tracing::debug!(item_id = %item.id, "Adding item to cart");
        self.dispatch(CartCommand::Add(CartItem::from(item))).await
    }

    pub async fn remove_item(&self, item_id: MenuItemId) -> Cart {
        self.dispatch(CartCommand::Remove(item_id)).await
    }

    pub async fn update_quantity(&self, item_id: MenuItemId, quantity: i64) -> Cart {
        self.dispatch(CartCommand::UpdateQuantity { item_id, quantity })
            .await
    }

    pub async fn clear(&self) -> Cart {
        self.dispatch(CartCommand::Clear).await
    }

    /// Remove what an order took from the cart.
    pub async fn remove_ordered(&self, ordered: Vec<(MenuItemId, u32)>) -> Cart {
        self.dispatch(CartCommand::RemoveOrdered(ordered)).await
    }

    /// Claim the checkout lock, or `None` while another checkout holds it.
    #[must_use]
    pub fn try_begin_checkout(&self) -> Option<MutexGuard<'_, ()>> {
        self.checkout.try_lock().ok()
    }
}
