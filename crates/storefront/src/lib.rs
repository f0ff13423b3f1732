//! Delicious Bites storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod latency;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;
pub mod tracking;
