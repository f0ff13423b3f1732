//! HTTP middleware for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Auth extractors per handler (`RequireIdentity`, `RequireAdmin`)

pub mod auth;

pub use auth::{AuthRejection, OptionalIdentity, RequireAdmin, RequireIdentity};
