//! Placed order records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use delicious_bites_core::{DeliveryType, Email, Money, OrderId, OrderStatus, PaymentMethod};

/// Address recorded on pickup orders.
pub const PICKUP_ADDRESS: &str = "Pickup at restaurant";

/// One line of a placed order.
///
/// Name and price are copied from the cart when the order is placed, so later
/// menu edits never change an existing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: Money,
}

impl OrderLine {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

/// A placed order in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_email: Option<Email>,
    pub customer_phone: Option<String>,
    pub items: Vec<OrderLine>,
    pub total: Money,
    pub delivery_type: DeliveryType,
    pub address: String,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_id: Option<String>,
    pub instructions: Option<String>,
}

/// Everything needed to place an order except what the ledger assigns
/// (ID, date, and initial status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_email: Option<Email>,
    pub customer_phone: Option<String>,
    pub items: Vec<OrderLine>,
    pub total: Money,
    pub delivery_type: DeliveryType,
    pub address: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_id: Option<String>,
    pub instructions: Option<String>,
}

impl OrderDraft {
    /// Turn the draft into a pending order.
    #[must_use]
    pub fn place(self, id: OrderId, order_date: DateTime<Utc>) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            items: self.items,
            total: self.total,
            delivery_type: self.delivery_type,
            address: self.address,
            status: OrderStatus::Pending,
            order_date,
            payment_method: self.payment_method,
            payment_id: self.payment_id,
            instructions: self.instructions,
        }
    }
}
