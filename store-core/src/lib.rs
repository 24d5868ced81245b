//! Brasa Store Core - order lifecycle, pricing, and realtime sync
//!
//! # Architecture
//!
//! The authoritative side of the Brasa order platform. Customers build
//! a cart and check out; staff dashboards observe every order through a
//! coarse invalidation channel and drive its status through a one-way
//! pipeline.
//!
//! ```text
//! store-core/src/
//! ├── core/      # configuration
//! ├── db/        # order store port + in-memory implementation
//! ├── pricing    # pure line/total price computation
//! ├── cart       # session-scoped cart assembly and validation
//! ├── lifecycle  # status transition driver
//! ├── checkout   # place-order orchestration
//! ├── sync       # order change channel (invalidation signals)
//! ├── notify     # notification hand-off + summary rendering
//! └── utils/     # logging, input validation
//! ```
//!
//! Data flow: `cart` → `pricing` → `checkout` → `db` → `sync` fan-out →
//! every subscribed dashboard refetches and replaces its projection.

pub mod cart;
pub mod checkout;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod notify;
pub mod pricing;
pub mod sync;
pub mod utils;

// Re-export public types
pub use cart::{CartLine, CartSession};
pub use checkout::{Checkout, CheckoutInfo};
pub use core::Config;
pub use db::{MemoryOrderStore, OrderStore};
pub use lifecycle::{TransitionOutcome, transition};
pub use notify::{HandoffError, LogHandoff, NotificationHandoff};
pub use sync::{ChangeSignal, OrderChannel, Subscription};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
