//! Pricing engine
//!
//! Pure, deterministic price computation for cart lines and order
//! totals. All arithmetic stays in `Decimal`; summation always happens
//! before rounding so per-line rounding error can never accumulate into
//! the total. Rounding to 2 places (half-up) is applied only at render
//! and serialization boundaries.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::{DeliveryType, Product};
use std::collections::BTreeMap;

/// Modifier selections for one cart line: group id -> selected modifier ids
pub type Selections = BTreeMap<String, Vec<String>>;

/// Fixed delivery fee (5.00), applied only for delivery orders
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Monetary rounding: 2 fraction digits, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a monetary value, always with 2 fraction digits
pub fn format_money(value: Decimal) -> String {
    let mut value = round_money(value);
    value.rescale(2);
    format!("R$ {value}")
}

/// Price of one cart line: `(product price + Σ selected modifier
/// deltas) × quantity`.
///
/// Selections that do not resolve against the product's groups
/// contribute nothing; rejecting them is cart validation's job, pricing
/// stays a pure function of its inputs.
pub fn line_price(product: &Product, selections: &Selections, quantity: i32) -> Decimal {
    let mut unit = product.price;
    for (group_id, modifier_ids) in selections {
        let Some(group) = product.group(group_id) else {
            continue;
        };
        for modifier_id in modifier_ids {
            if let Some(modifier) = group.modifier(modifier_id) {
                unit += modifier.price_delta;
            }
        }
    }
    unit * Decimal::from(quantity)
}

/// The delivery fee owed for this delivery type
pub fn delivery_fee(delivery: &DeliveryType) -> Decimal {
    if delivery.is_delivery() {
        DELIVERY_FEE
    } else {
        Decimal::ZERO
    }
}

/// Order total: cart subtotal plus the delivery fee when delivering
pub fn order_total(subtotal: Decimal, delivery: &DeliveryType) -> Decimal {
    subtotal + delivery_fee(delivery)
}
