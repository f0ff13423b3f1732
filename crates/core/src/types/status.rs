//! Status and selector enums shared across the storefront.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders only ever move forward through [`OrderStatus::ALL`]:
/// `pending -> preparing -> ready -> delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    /// Every status in progression order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Preparing, Self::Ready, Self::Delivered];

    /// Position of this status in the progression (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::Preparing => 1,
            Self::Ready => 2,
            Self::Delivered => 3,
        }
    }

    /// The status that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Returns `true` if `self` comes strictly after `other`.
    #[must_use]
    pub const fn is_after(self, other: Self) -> bool {
        self.index() > other.index()
    }

    /// Human-readable tracking step label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Order Received",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready for Pickup/Delivery",
            Self::Delivered => "Delivered",
        }
    }

    /// Estimated time remaining shown on the tracking page.
    #[must_use]
    pub const fn estimated_time(self) -> &'static str {
        match self {
            Self::Pending | Self::Ready => "5-10 minutes",
            Self::Preparing => "20-30 minutes",
            Self::Delivered => "Completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Ready => write!(f, "ready"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Access role of a signed-in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular shopper.
    #[default]
    User,
    /// Restaurant staff with access to the admin dashboard.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    #[default]
    Delivery,
    Pickup,
}

impl DeliveryType {
    /// Quoted lead time for this fulfilment option.
    #[must_use]
    pub const fn lead_time(self) -> &'static str {
        match self {
            Self::Delivery => "30-45 min",
            Self::Pickup => "15-20 min",
        }
    }
}

impl std::fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivery => write!(f, "delivery"),
            Self::Pickup => write!(f, "pickup"),
        }
    }
}

/// Payment method selected at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card; the only method with form fields.
    #[default]
    Card,
    /// Placeholder for a PayPal redirect.
    Paypal,
    /// Placeholder for Apple Pay.
    Apple,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Paypal => write!(f, "paypal"),
            Self::Apple => write!(f, "apple"),
        }
    }
}

/// Outcome recorded on a payment receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_progression_is_linear() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            assert!(next.is_after(status));
            seen.push(next);
            status = next;
        }
        assert_eq!(seen, OrderStatus::ALL);
    }

    #[test]
    fn test_is_after_is_strict() {
        assert!(!OrderStatus::Preparing.is_after(OrderStatus::Preparing));
        assert!(!OrderStatus::Pending.is_after(OrderStatus::Ready));
        assert!(OrderStatus::Delivered.is_after(OrderStatus::Pending));
    }

    #[test]
    fn test_status_display_roundtrips_through_from_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>(), Ok(status));
        }
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_estimated_time() {
        assert_eq!(OrderStatus::Preparing.estimated_time(), "20-30 minutes");
        assert_eq!(OrderStatus::Delivered.estimated_time(), "Completed");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&DeliveryType::Pickup).ok().as_deref(),
            Some("\"pickup\"")
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Apple).ok().as_deref(),
            Some("\"apple\"")
        );
        assert_eq!(
            serde_json::to_string(&Role::Admin).ok().as_deref(),
            Some("\"admin\"")
        );
    }
}
