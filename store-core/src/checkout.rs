//! Checkout orchestration
//!
//! Turns a validated cart plus customer details into a persisted
//! `pending` order, then hands the rendered summary to the notification
//! channel. Two independently-failing steps, in a fixed order: if the
//! store rejects the order nothing is ever handed off, and if the
//! hand-off fails after a successful creation the order stands.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{AppResult, DeliveryType, Order, OrderDraft};

use crate::cart::CartSession;
use crate::core::Config;
use crate::db::OrderStore;
use crate::notify::{self, NotificationHandoff};
use crate::pricing;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};

/// Customer details collected at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutInfo {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery: DeliveryType,
    /// Recorded as a label only, never processed
    pub payment_method: String,
}

/// Checkout orchestrator
pub struct Checkout {
    store: Arc<dyn OrderStore>,
    handoff: Arc<dyn NotificationHandoff>,
    config: Config,
}

impl Checkout {
    pub fn new(
        store: Arc<dyn OrderStore>,
        handoff: Arc<dyn NotificationHandoff>,
        config: Config,
    ) -> Self {
        Self {
            store,
            handoff,
            config,
        }
    }

    /// Place an order.
    ///
    /// Validation (fields, then cart cardinality) runs locally and
    /// blocks checkout before any store call. The created order is
    /// always `pending` regardless of anything the caller supplies —
    /// the draft type has no status field to set.
    pub async fn place_order(&self, cart: &CartSession, info: CheckoutInfo) -> AppResult<Order> {
        validate_checkout_info(&info)?;
        cart.validate()?;

        let lines = cart.to_order_lines();
        let total = pricing::order_total(cart.subtotal(), &info.delivery);
        let draft = OrderDraft {
            customer_name: info.customer_name,
            customer_phone: info.customer_phone,
            delivery: info.delivery,
            payment_method: info.payment_method,
            total,
            lines,
        };

        // Abort before the hand-off: never notify about an order that
        // was not durably recorded.
        let order = self.store.create_order(draft).await?;

        let summary = notify::render_summary(&order, &self.config.store_name);
        if let Err(e) = self.handoff.send(&summary).await {
            tracing::warn!(order_id = order.id, error = %e, "hand-off failed, order stands");
        }

        Ok(order)
    }
}

/// Required-field validation: name, phone, and the address when the
/// order is for delivery.
fn validate_checkout_info(info: &CheckoutInfo) -> AppResult<()> {
    validate_required_text(&info.customer_name, "customer name", MAX_NAME_LEN)?;
    validate_required_text(&info.customer_phone, "customer phone", MAX_PHONE_LEN)?;
    validate_required_text(&info.payment_method, "payment method", MAX_SHORT_TEXT_LEN)?;
    if let DeliveryType::Delivery { address } = &info.delivery {
        validate_required_text(address, "delivery address", MAX_ADDRESS_LEN)?;
    }
    Ok(())
}
