//! Shared types for the Brasa order platform
//!
//! Common types used by both the store core and the dashboard client:
//! the catalog and order data model, the unified error system, and small
//! id/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, RepoError, RepoResult};
pub use models::{
    DeliveryType, Modifier, ModifierGroup, Order, OrderDraft, OrderLine, OrderStatus, Product,
};
