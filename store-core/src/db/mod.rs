//! Order store port
//!
//! The durable relational store is an external collaborator; the core
//! reaches it through [`OrderStore`]. The store is the sole source of
//! truth for orders: every in-memory `Order` a dashboard holds is a
//! read-only projection that is replaced wholesale, never patched
//! field-by-field.

pub mod memory;

pub use memory::MemoryOrderStore;

use async_trait::async_trait;
use shared::{Order, OrderDraft, OrderStatus, Product, RepoResult};

/// Create/read/update-by-id/list access to orders, plus the read-only
/// product catalog.
///
/// Implementations must surface not-found and constraint-violation
/// failures distinctly from transport failures (see
/// [`shared::RepoError`]), and `update_status` must be atomic per
/// order: it is the serialization point when two dashboards race to
/// transition the same order.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order. The store assigns the id and creation
    /// timestamp; every order starts `pending`.
    async fn create_order(&self, draft: OrderDraft) -> RepoResult<Order>;

    /// Fetch one order by id
    async fn get_order(&self, id: i64) -> RepoResult<Order>;

    /// Set an order's status. Writing the status the order already has
    /// is a no-op, not an error. A write that would leave the closed
    /// transition table fails with `RepoError::Conflict` and leaves the
    /// stored status unchanged.
    async fn update_status(&self, id: i64, status: OrderStatus) -> RepoResult<()>;

    /// All orders, newest first (creation time descending)
    async fn list_orders(&self) -> RepoResult<Vec<Order>>;

    /// The product catalog, ordered by name
    async fn list_products(&self) -> RepoResult<Vec<Product>>;
}
