//! Order ledger: every placed order, most recent first.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;

use delicious_bites_core::{Email, Money, OrderId, OrderStatus};

use crate::latency::Latency;
use crate::models::{Order, OrderDraft};
use crate::seed;

/// Rejected ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Status updates must move strictly forward.
    #[error("order {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
}

/// Dashboard summary of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub total_revenue: Money,
    pub order_count: usize,
    /// Zero when there are no orders.
    pub average_order_value: Money,
}

/// Mutations of [`Ledger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    Loaded(Vec<Order>),
    SetLoading(bool),
    /// Prepend a new order.
    Placed(Order),
    /// Set the status of an order. No-op if the ID is absent.
    StatusUpdated { id: OrderId, status: OrderStatus },
}

/// Ledger state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    orders: Vec<Order>,
    loading: bool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            loading: true,
        }
    }
}

impl Ledger {
    /// Apply a command.
    ///
    /// `StatusUpdated` is not checked here; use
    /// [`check_transition`](Self::check_transition) first.
    pub fn apply(&mut self, command: OrderCommand) {
        match command {
            OrderCommand::Loaded(orders) => {
                self.orders = orders;
                self.loading = false;
            }
            OrderCommand::SetLoading(loading) => self.loading = loading,
            OrderCommand::Placed(order) => self.orders.insert(0, order),
            OrderCommand::StatusUpdated { id, status } => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
                    order.status = status;
                }
            }
        }
    }

    /// Orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// The most recently placed order.
    #[must_use]
    pub fn latest(&self) -> Option<&Order> {
        self.orders.first()
    }

    /// Orders placed with `email` as the contact address.
    #[must_use]
    pub fn orders_for(&self, email: &Email) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.customer_email.as_ref() == Some(email))
            .collect()
    }

    /// Check that order `id` may move to `to`.
    ///
    /// Returns the current status, or `None` if there is no such order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless `to` is strictly after the current
    /// status. Skipping ahead is allowed.
    pub fn check_transition(
        &self,
        id: OrderId,
        to: OrderStatus,
    ) -> Result<Option<OrderStatus>, LedgerError> {
        let Some(order) = self.get(id) else {
            return Ok(None);
        };
        if to.is_after(order.status) {
            Ok(Some(order.status))
        } else {
            Err(LedgerError::InvalidTransition {
                id,
                from: order.status,
                to,
            })
        }
    }

    /// Revenue, count, and average order value.
    #[must_use]
    pub fn stats(&self) -> LedgerStats {
        let total_revenue: Money = self.orders.iter().map(|o| o.total).sum();
        let order_count = self.orders.len();
        let average_order_value = u32::try_from(order_count)
            .ok()
            .filter(|&n| n > 0)
            .map_or(Money::ZERO, |n| {
                Money::new(total_revenue.amount() / rust_decimal::Decimal::from(n))
            });

        LedgerStats {
            total_revenue,
            order_count,
            average_order_value,
        }
    }

    fn fresh_id(&self, now_millis: i64) -> OrderId {
        OrderId::new(super::fresh_id(
            now_millis,
            self.orders.iter().map(|o| o.id.as_i64()),
        ))
    }
}

/// Handle to the order ledger.
#[derive(Debug)]
pub struct OrderLedger {
    state: RwLock<Ledger>,
    latency: Latency,
}

impl OrderLedger {
    /// Create an empty, loading ledger. Call [`load`](Self::load) once at
    /// startup.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self {
            state: RwLock::new(Ledger::default()),
            latency,
        }
    }

    /// Populate the ledger with the seed orders after the simulated delay.
    pub async fn load(&self) {
        self.dispatch(OrderCommand::SetLoading(true)).await;
        self.latency.wait().await;

        let orders = seed::orders(chrono::Utc::now());
        tracing::info!(orders = orders.len(), "Order ledger loaded");
        self.dispatch(OrderCommand::Loaded(orders)).await;
    }

    pub async fn dispatch(&self, command: OrderCommand) {
        self.state.write().await.apply(command);
    }

    pub async fn snapshot(&self) -> Ledger {
        self.state.read().await.clone()
    }

    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.state.read().await.get(id).cloned()
    }

    pub async fn stats(&self) -> LedgerStats {
        self.state.read().await.stats()
    }

    pub async fn orders_for(&self, email: &Email) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders_for(email)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Record a new pending order stamped with a fresh ID and the current
    /// time.
    pub async fn create_order(&self, draft: OrderDraft) -> Order {
        let now = chrono::Utc::now();
        let mut ledger = self.state.write().await;
        let order = draft.place(ledger.fresh_id(now.timestamp_millis()), now);
        ledger.apply(OrderCommand::Placed(order.clone()));
        drop(ledger);

        tracing::info!(
            order_id = %order.id,
            total = %order.total,
            delivery_type = %order.delivery_type,
            "Order placed"
        );
        order
    }

    /// Move order `id` to `status`.
    ///
    /// Returns the updated order, or `None` (changing nothing) if there is
    /// no such order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` if `status` is not strictly after the
    /// order's current status.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, LedgerError> {
        let mut ledger = self.state.write().await;
        let Some(from) = ledger.check_transition(id, status)? else {
            tracing::debug!(order_id = %id, "Status update ignored for unknown order");
            return Ok(None);
        };
        ledger.apply(OrderCommand::StatusUpdated { id, status });
        let updated = ledger.get(id).cloned();
        drop(ledger);

        tracing::info!(order_id = %id, %from, to = %status, "Order status updated");
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::OrderLine;
    use delicious_bites_core::DeliveryType;

    fn draft(email: Option<&str>, cents: i64) -> OrderDraft {
        OrderDraft {
            customer_name: "Test Customer".to_owned(),
            customer_email: email.map(|e| Email::parse(e).unwrap()),
            customer_phone: None,
            items: vec![OrderLine {
                name: "Chocolate Cake".to_owned(),
                quantity: 1,
                price: Money::from_cents(cents),
            }],
            total: Money::from_cents(cents),
            delivery_type: DeliveryType::Pickup,
            address: "Pickup at restaurant".to_owned(),
            payment_method: None,
            payment_id: None,
            instructions: None,
        }
    }

    async fn loaded() -> OrderLedger {
        let ledger = OrderLedger::new(Latency::NONE);
        ledger.load().await;
        ledger
    }

    #[tokio::test]
    async fn test_create_order_is_pending_and_first() {
        let ledger = loaded().await;
        let order = ledger.create_order(draft(None, 699)).await;

        assert_eq!(order.status, OrderStatus::Pending);
        let snapshot = ledger.snapshot().await;
        assert_eq!(snapshot.latest(), Some(&order));
        assert_eq!(snapshot.orders().len(), 3);
    }

    #[tokio::test]
    async fn test_create_order_ids_are_unique() {
        let ledger = loaded().await;
        let a = ledger.create_order(draft(None, 100)).await;
        let b = ledger.create_order(draft(None, 100)).await;
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_status_forward_and_skip() {
        let ledger = loaded().await;
        let order = ledger.create_order(draft(None, 699)).await;

        let updated = ledger
            .update_status(order.id, OrderStatus::Ready)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn test_update_status_rejects_backward_and_same() {
        let ledger = loaded().await;
        let err = ledger
            .update_status(OrderId::new(1), OrderStatus::Pending)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidTransition {
                id: OrderId::new(1),
                from: OrderStatus::Preparing,
                to: OrderStatus::Pending,
            }
        );

        assert!(
            ledger
                .update_status(OrderId::new(1), OrderStatus::Preparing)
                .await
                .is_err()
        );
        assert_eq!(
            ledger.get(OrderId::new(1)).await.unwrap().status,
            OrderStatus::Preparing
        );
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_is_noop() {
        let ledger = loaded().await;
        let before = ledger.snapshot().await;
        let result = ledger
            .update_status(OrderId::new(404), OrderStatus::Delivered)
            .await;
        assert_eq!(result, Ok(None));
        assert_eq!(ledger.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_stats_over_seed_orders() {
        let ledger = loaded().await;
        let stats = ledger.stats().await;
        assert_eq!(stats.order_count, 2);
        assert_eq!(stats.total_revenue, Money::from_cents(5396));
        assert_eq!(stats.average_order_value, Money::from_cents(2698));
    }

    #[test]
    fn test_stats_empty_ledger() {
        let stats = Ledger::default().stats();
        assert_eq!(stats.order_count, 0);
        assert_eq!(stats.average_order_value, Money::ZERO);
    }

    #[tokio::test]
    async fn test_orders_for_matches_contact_email() {
        let ledger = loaded().await;
        ledger.create_order(draft(Some("user@example.com"), 100)).await;
        ledger.create_order(draft(Some("other@example.com"), 200)).await;

        let email = Email::parse("user@example.com").unwrap();
        let mine = ledger.orders_for(&email).await;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].total, Money::from_cents(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_waits_for_latency() {
        let ledger = OrderLedger::new(Latency::from_millis(1000));
        assert!(ledger.snapshot().await.is_loading());
        let start = tokio::time::Instant::now();
        ledger.load().await;
        assert_eq!(start.elapsed(), std::time::Duration::from_millis(1000));
        assert!(!ledger.snapshot().await.is_loading());
    }
}
