//! Checkout workflow.
//!
//! A single pass from cart to order: validate the contact form, price the
//! cart, charge the gateway, then record the order and take the ordered lines
//! out of the cart. Nothing is written until the charge is approved, so a
//! declined attempt can be retried as-is. One checkout runs at a time.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use delicious_bites_core::{DeliveryType, Email, Money, PaymentMethod};

use crate::models::order::PICKUP_ADDRESS;
use crate::models::{Order, OrderDraft};
use crate::services::payment::{CardDetails, PaymentError, PaymentGateway, PaymentReceipt, PaymentRequest};
use crate::stores::{CartStore, OrderLedger};

/// Flat delivery fee for small delivery orders.
pub const DELIVERY_FEE: Money = Money::new(Decimal::from_parts(299, 0, 0, false, 2));

/// Delivery is free at or above this subtotal.
pub const FREE_DELIVERY_THRESHOLD: Money = Money::new(Decimal::from_parts(25, 0, 0, false, 0));

/// Sales tax applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Price breakdown shown on the checkout page.
///
/// Amounts are exact; round with [`Money::rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
}

impl PriceBreakdown {
    #[must_use]
    pub fn compute(subtotal: Money, delivery_type: DeliveryType) -> Self {
        let delivery_fee =
            if delivery_type == DeliveryType::Delivery && subtotal < FREE_DELIVERY_THRESHOLD {
                DELIVERY_FEE
            } else {
                Money::ZERO
            };
        let tax = subtotal.scale(TAX_RATE);
        Self {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal + delivery_fee + tax,
        }
    }
}

// =============================================================================
// Contact form
// =============================================================================

/// A contact field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Address,
    City,
    ZipCode,
}

/// Customer details from the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub instructions: String,
}

/// A [`CheckoutForm`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub email: Email,
    pub phone: String,
    /// Delivery address line, or the pickup marker.
    pub address: String,
    pub instructions: Option<String>,
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl CheckoutForm {
    /// Check required fields. Address, city, and ZIP are only required for
    /// delivery.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidForm` listing every missing or
    /// malformed field.
    pub fn validate(&self, delivery_type: DeliveryType) -> Result<Contact, CheckoutError> {
        let mut fields = Vec::new();
        if blank(&self.name) {
            fields.push(FormField::Name);
        }
        let email = Email::parse(&self.email).ok();
        if email.is_none() {
            fields.push(FormField::Email);
        }
        if blank(&self.phone) {
            fields.push(FormField::Phone);
        }
        if delivery_type == DeliveryType::Delivery {
            if blank(&self.address) {
                fields.push(FormField::Address);
            }
            if blank(&self.city) {
                fields.push(FormField::City);
            }
            if blank(&self.zip_code) {
                fields.push(FormField::ZipCode);
            }
        }

        let Some(email) = email.filter(|_| fields.is_empty()) else {
            return Err(CheckoutError::InvalidForm { fields });
        };

        let address = match delivery_type {
            DeliveryType::Delivery => format!(
                "{}, {}, {}",
                self.address.trim(),
                self.city.trim(),
                self.zip_code.trim()
            ),
            DeliveryType::Pickup => PICKUP_ADDRESS.to_owned(),
        };
        let instructions = Some(self.instructions.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(Contact {
            name: self.name.trim().to_owned(),
            email,
            phone: self.phone.trim().to_owned(),
            address,
            instructions,
        })
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Errors that stop a checkout attempt. None of them change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("your cart is empty")]
    EmptyCart,

    #[error("checkout already in progress, please try again")]
    InProgress,

    #[error("please fill in all required fields")]
    InvalidForm { fields: Vec<FormField> },

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Everything submitted on the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub form: CheckoutForm,
    pub delivery_type: DeliveryType,
    pub payment_method: PaymentMethod,
    pub card: Option<CardDetails>,
}

/// A placed order and where to send the shopper next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order: Order,
    pub receipt: PaymentReceipt,
    pub breakdown: PriceBreakdown,
    pub redirect_to: String,
    pub redirect_after_ms: u64,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    cart: &'a CartStore,
    ledger: &'a OrderLedger,
    gateway: &'a dyn PaymentGateway,
    redirect_delay: Duration,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(
        cart: &'a CartStore,
        ledger: &'a OrderLedger,
        gateway: &'a dyn PaymentGateway,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            cart,
            ledger,
            gateway,
            redirect_delay,
        }
    }

    /// Price the current cart.
    pub async fn quote(&self, delivery_type: DeliveryType) -> PriceBreakdown {
        PriceBreakdown::compute(self.cart.snapshot().await.subtotal(), delivery_type)
    }

    /// Run the checkout workflow.
    ///
    /// The order is built from the cart as it was when the attempt started.
    /// On success only those lines are taken out of the cart; items added
    /// while the payment was pending stay.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InProgress` while another checkout is
    /// running, `CheckoutError::EmptyCart` for an empty cart,
    /// `CheckoutError::InvalidForm` for missing contact fields, and
    /// `CheckoutError::Payment` if the charge fails. The cart and ledger are
    /// untouched in every error case.
    #[tracing::instrument(skip(self, request), fields(delivery_type = %request.delivery_type, method = %request.payment_method))]
    pub async fn place_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let Some(_checkout) = self.cart.try_begin_checkout() else {
            tracing::warn!("Rejected concurrent checkout");
            return Err(CheckoutError::InProgress);
        };
        let cart = self.cart.snapshot().await;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let contact = request.form.validate(request.delivery_type)?;
        let breakdown = PriceBreakdown::compute(cart.subtotal(), request.delivery_type);
        let amount = breakdown.total.rounded();

        let receipt = self
            .gateway
            .charge(PaymentRequest {
                amount,
                method: request.payment_method,
                card: request.card,
            })
            .await?;

        let order = self
            .ledger
            .create_order(OrderDraft {
                customer_name: contact.name,
                customer_email: Some(contact.email),
                customer_phone: Some(contact.phone),
                items: cart.order_lines(),
                total: amount,
                delivery_type: request.delivery_type,
                address: contact.address,
                payment_method: Some(receipt.method),
                payment_id: Some(receipt.transaction_id.clone()),
                instructions: contact.instructions,
            })
            .await;
        self.cart.remove_ordered(cart.quantities()).await;

        tracing::info!(order_id = %order.id, total = %amount, "Checkout complete");
        Ok(OrderConfirmation {
            redirect_to: format!("/order-tracking?orderId={}", order.id),
            redirect_after_ms: u64::try_from(self.redirect_delay.as_millis()).unwrap_or(u64::MAX),
            order,
            receipt,
            breakdown,
        })
    }
}
