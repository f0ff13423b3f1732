//! Delicious Bites Core - Shared domain types.
//!
//! This crate provides the types shared by every Delicious Bites component:
//! - `storefront` - Menu, cart, checkout, order tracking and admin surface
//! - `cli` - Command-line tools for browsing the menu and managing the identity
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no HTTP. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
