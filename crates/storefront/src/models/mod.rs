//! Domain models for the storefront.
//!
//! These are the records owned by the stores: signed-in identities, menu
//! items, and placed orders. Cart lines live with the cart store because they
//! never leave it.

pub mod identity;
pub mod menu;
pub mod order;

pub use identity::Identity;
pub use menu::{MenuItem, MenuItemDraft};
pub use order::{Order, OrderDraft, OrderLine};
