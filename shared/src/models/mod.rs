//! Data model shared between the store core and dashboard clients

pub mod order;
pub mod product;

pub use order::{DeliveryType, Order, OrderDraft, OrderLine, OrderStatus};
pub use product::{Modifier, ModifierGroup, Product};
