//! Notification hand-off
//!
//! After a successful checkout the store hands a human-readable order
//! summary to an outbound chat channel. The hand-off is best-effort and
//! sits outside the transactional boundary: it is only attempted after
//! the order is durably recorded, and its failure never rolls the order
//! back.

use async_trait::async_trait;
use shared::Order;
use thiserror::Error;

use crate::pricing::{self, format_money};

/// Hand-off failure. Reported, never fatal to checkout.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Channel unavailable: {0}")]
    Unavailable(String),
}

/// Outbound channel for order summaries
#[async_trait]
pub trait NotificationHandoff: Send + Sync {
    async fn send(&self, summary: &str) -> Result<(), HandoffError>;
}

/// Default hand-off: deliver the summary to the structured log.
///
/// Stands in for the real chat channel in development and tests.
pub struct LogHandoff {
    destination: String,
}

impl LogHandoff {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

#[async_trait]
impl NotificationHandoff for LogHandoff {
    async fn send(&self, summary: &str) -> Result<(), HandoffError> {
        tracing::info!(destination = %self.destination, %summary, "order summary handed off");
        Ok(())
    }
}

/// Render the human-readable order summary handed to the chat channel.
pub fn render_summary(order: &Order, store_name: &str) -> String {
    let mut message = format!("*NEW ORDER - {}*\n\n", store_name.to_uppercase());
    message.push_str(&format!("*Customer:* {}\n", order.customer_name));
    message.push_str(&format!("*Phone:* {}\n", order.customer_phone));
    message.push_str(&format!(
        "*Type:* {}\n",
        if order.delivery.is_delivery() {
            "Delivery"
        } else {
            "Pickup"
        }
    ));
    if let Some(address) = order.delivery.address() {
        message.push_str(&format!("*Address:* {address}\n"));
    }

    message.push_str("\n*---------------- ORDER ----------------*\n");
    for line in &order.lines {
        message.push_str(&format!("\n*{}x {}*\n", line.quantity, line.product_name));
        for option in line
            .options_summary
            .split(", ")
            .filter(|s| !s.is_empty())
        {
            message.push_str(&format!("   + {option}\n"));
        }
    }

    let fee = pricing::delivery_fee(&order.delivery);
    let subtotal = order.total - fee;
    message.push_str("\n*---------------- TOTALS ----------------*\n");
    message.push_str(&format!("Subtotal: {}\n", format_money(subtotal)));
    message.push_str(&format!("Delivery: {}\n", format_money(fee)));
    message.push_str(&format!("*TOTAL: {}*\n", format_money(order.total)));
    message.push_str(&format!(
        "Payment: *{}*\n",
        order.payment_method.to_uppercase()
    ));
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{DeliveryType, OrderLine, OrderStatus};

    fn order(delivery: DeliveryType, total: Decimal) -> Order {
        Order {
            id: 1,
            created_at: 0,
            customer_name: "Rodrigo".into(),
            customer_phone: "11 99999-0000".into(),
            delivery,
            payment_method: "pix".into(),
            status: OrderStatus::Pending,
            total,
            lines: vec![OrderLine {
                product_name: "Classic Burger".into(),
                unit_price: Decimal::new(1000, 2),
                quantity: 2,
                options_summary: "Rare, Extra Bacon".into(),
                line_total: Decimal::new(2400, 2),
            }],
        }
    }

    #[test]
    fn summary_lists_items_and_totals() {
        let summary = render_summary(
            &order(DeliveryType::Pickup, Decimal::new(2400, 2)),
            "Brasa Burgers",
        );
        assert!(summary.contains("*NEW ORDER - BRASA BURGERS*"));
        assert!(summary.contains("*2x Classic Burger*"));
        assert!(summary.contains("   + Rare\n"));
        assert!(summary.contains("   + Extra Bacon\n"));
        assert!(summary.contains("Subtotal: R$ 24.00"));
        assert!(summary.contains("Delivery: R$ 0.00"));
        assert!(summary.contains("*TOTAL: R$ 24.00*"));
        assert!(summary.contains("Payment: *PIX*"));
    }

    #[test]
    fn address_block_appears_only_for_delivery() {
        let pickup = render_summary(
            &order(DeliveryType::Pickup, Decimal::new(2400, 2)),
            "Brasa",
        );
        assert!(!pickup.contains("*Address:*"));
        assert!(pickup.contains("*Type:* Pickup"));

        let delivery = render_summary(
            &order(
                DeliveryType::Delivery {
                    address: "Rua das Flores, 123".into(),
                },
                Decimal::new(2900, 2),
            ),
            "Brasa",
        );
        assert!(delivery.contains("*Type:* Delivery"));
        assert!(delivery.contains("*Address:* Rua das Flores, 123"));
        assert!(delivery.contains("Subtotal: R$ 24.00"));
        assert!(delivery.contains("Delivery: R$ 5.00"));
        assert!(delivery.contains("*TOTAL: R$ 29.00*"));
    }

    #[test]
    fn line_without_options_renders_no_option_rows() {
        let mut o = order(DeliveryType::Pickup, Decimal::new(2000, 2));
        o.lines[0].options_summary = String::new();
        let summary = render_summary(&o, "Brasa");
        assert!(!summary.contains("   + "));
    }
}
