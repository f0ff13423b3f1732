//! Application state containers.
//!
//! Each store owns one slice of state:
//!
//! - [`identity`] - the signed-in identity (persisted to local storage)
//! - [`catalog`] - menu items and categories (seeded at load)
//! - [`cart`] - the shopper's selections (in memory only)
//! - [`orders`] - the order ledger (seeded at load)
//!
//! # Structure
//!
//! Every store is split in two:
//!
//! - a plain state value (`AuthState`, `Catalog`, `Cart`, `Ledger`) with a
//!   command enum and a synchronous `apply`. All mutation goes through
//!   `apply`, so every transition is an exhaustive `match`.
//! - an async handle (`IdentityStore`, `CatalogStore`, `CartStore`,
//!   `OrderLedger`) that owns the state behind a `tokio::sync::RwLock`.
//!
//! Handles take the write lock only for the duration of a single `apply`.
//! Simulated remote latency is always awaited with no lock held, so a slow
//! login never blocks cart updates.

pub mod cart;
pub mod catalog;
pub mod identity;
pub mod orders;

pub use cart::{Cart, CartCommand, CartItem, CartLine, CartStore, MAX_LINE_QUANTITY};
pub use catalog::{Catalog, CatalogCommand, CatalogStore, DietaryFilter, MenuQuery, MenuSort};
pub use identity::{AuthCommand, AuthState, IdentityStore};
pub use orders::{Ledger, LedgerError, LedgerStats, OrderCommand, OrderLedger};

/// Pick an ID for a new record.
///
/// IDs come from the epoch-millisecond clock, bumped past the largest
/// existing ID so two records created in the same millisecond never collide.
pub(crate) fn fresh_id(now_millis: i64, existing: impl Iterator<Item = i64>) -> i64 {
    let next_free = existing.max().map_or(1, |max| max.saturating_add(1));
    now_millis.max(next_free)
}
