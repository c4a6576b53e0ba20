//! Orders

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::CartLine;

/// Fulfilment status of an order.
///
/// Checkout always creates orders as [`OrderStatus::Processing`]; the other
/// variants exist so histories advanced out of band still deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order received, not yet dispatched.
    Processing,

    /// Order handed to the carrier.
    Shipped,

    /// Order delivered to the customer.
    Delivered,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Processing => write!(f, "Processing"),
            Self::Shipped => write!(f, "Shipped"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

/// An immutable record of a completed checkout.
///
/// Lines are deep copies of the cart at checkout time; clearing or mutating
/// the cart afterwards never touches an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier, unique within this device's history.
    pub id: String,

    /// Timestamp of checkout.
    pub placed_at: Timestamp,

    /// Sum of line totals at checkout time.
    pub subtotal: Decimal,

    /// Flat shipping charge applied to the order.
    pub shipping: Decimal,

    /// Amount charged: subtotal plus shipping.
    pub total: Decimal,

    /// Fulfilment status.
    pub status: OrderStatus,

    /// Cart lines captured at checkout.
    pub lines: Vec<CartLine>,
}

impl Order {
    /// Assemble a new `Processing` order from a cart snapshot.
    ///
    /// Identifiers are an `ORD-` prefix over a v4 UUID, collision resistant
    /// without needing a uniqueness check against history.
    #[must_use]
    pub fn place(
        lines: Vec<CartLine>,
        subtotal: Decimal,
        shipping: Decimal,
        placed_at: Timestamp,
    ) -> Self {
        Self {
            id: format!("ORD-{}", Uuid::new_v4().simple()),
            placed_at,
            subtotal,
            shipping,
            total: subtotal + shipping,
            status: OrderStatus::Processing,
            lines,
        }
    }
}

/// Order history, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a newly placed order. Orders are never mutated or removed
    /// after this point.
    pub fn record(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Find an order by identifier.
    #[must_use]
    pub fn find(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    /// The most recently placed order.
    #[must_use]
    pub fn latest(&self) -> Option<&Order> {
        self.orders.first()
    }

    /// Iterate over orders, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Get the number of recorded orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
