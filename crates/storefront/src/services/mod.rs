//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Mock sign-in, registration, and logout
//! - `checkout` - Pricing and the cart-to-order workflow
//! - `payment` - Card masks and the simulated payment gateway
//! - `contact` - Contact form validation

pub mod auth;
pub mod checkout;
pub mod contact;
pub mod payment;

pub use auth::{AuthError, AuthService, CredentialDirectory};
pub use checkout::{CheckoutError, CheckoutForm, CheckoutRequest, CheckoutService, PriceBreakdown};
pub use payment::{PaymentError, PaymentGateway, SimulatedGateway};
