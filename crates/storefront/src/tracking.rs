//! Order tracking progress.

use serde::Serialize;

use delicious_bites_core::{OrderId, OrderStatus};

use crate::models::Order;

/// One step of the tracking timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackingStep {
    pub status: OrderStatus,
    pub label: &'static str,
    /// At or before the current status.
    pub is_completed: bool,
    /// Exactly the current status.
    pub is_active: bool,
}

/// The four tracking steps for an order at `current`.
#[must_use]
pub fn tracking_steps(current: OrderStatus) -> [TrackingStep; 4] {
    OrderStatus::ALL.map(|status| TrackingStep {
        status,
        label: status.label(),
        is_completed: status.index() <= current.index(),
        is_active: status == current,
    })
}

/// Pick the order to show: the one asked for, or the most recent.
///
/// `orders` must be most recent first, as the ledger keeps them.
#[must_use]
pub fn select_order(orders: &[Order], order_id: Option<OrderId>) -> Option<&Order> {
    match order_id {
        Some(id) => orders.iter().find(|order| order.id == id),
        None => orders.first(),
    }
}

/// Everything the tracking page shows for one order.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingView {
    pub order: Order,
    pub steps: [TrackingStep; 4],
    pub estimated_time: &'static str,
}

impl TrackingView {
    #[must_use]
    pub fn new(order: Order) -> Self {
        Self {
            steps: tracking_steps(order.status),
            estimated_time: order.status.estimated_time(),
            order,
        }
    }
}
