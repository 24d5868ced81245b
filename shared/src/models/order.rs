//! Order Model
//!
//! The persisted order record and its lifecycle state machine. Orders
//! are created exactly once at checkout (always `pending`), mutated only
//! through status transitions afterwards, and never deleted by normal
//! operation. Line items are immutable snapshots: a correction requires
//! a new order, not an edit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// ```text
/// pending ──► preparing ──► delivering ──► completed
///    │
///    └──────► cancelled
/// ```
///
/// `completed` and `cancelled` are terminal; every pair not in the
/// diagram is illegal. There is no un-accept or rollback path: the
/// pipeline is one-way, and any reversal is a `cancelled` plus a fresh
/// order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All states, in pipeline order
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// The closed transition table: the only targets reachable from
    /// this status.
    pub fn allowed_targets(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::Delivering],
            OrderStatus::Delivering => &[OrderStatus::Completed],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// No transition leaves a terminal state
    pub fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer receives the order.
///
/// The address is part of the `Delivery` variant so its presence is
/// enforced by the type, not by a runtime conditional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeliveryType {
    Delivery { address: String },
    Pickup,
}

impl DeliveryType {
    pub fn is_delivery(&self) -> bool {
        matches!(self, DeliveryType::Delivery { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            DeliveryType::Delivery { address } => Some(address),
            DeliveryType::Pickup => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryType::Delivery { .. } => "delivery",
            DeliveryType::Pickup => "pickup",
        }
    }
}

/// Order line snapshot, taken at order-creation time and never
/// re-derived from the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Flattened human-readable summary of the selected modifier names,
    /// e.g. "Medium Rare, Extra Bacon"
    pub options_summary: String,
    /// (unit_price + modifier deltas) x quantity, fixed at order time
    pub line_total: Decimal,
}

/// Persisted order record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Assigned by the store at creation
    pub id: i64,
    /// UTC milliseconds, assigned by the store at creation
    pub created_at: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery: DeliveryType,
    /// Recorded as a label only, never processed
    pub payment_method: String,
    pub status: OrderStatus,
    /// Sum of line totals plus the delivery fee when delivering
    pub total: Decimal,
    pub lines: Vec<OrderLine>,
}

/// Create payload: everything the store does not assign. The store
/// assigns id and creation timestamp and every order starts `pending` —
/// there is deliberately no status field a caller could set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery: DeliveryType,
    pub payment_method: String,
    pub total: Decimal,
    pub lines: Vec<OrderLine>,
}
