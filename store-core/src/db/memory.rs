//! In-process order store
//!
//! Keeps orders in a concurrent map and plays the role the managed
//! database plays in production: it assigns ids and timestamps, it is
//! the per-order serialization point for status writes, and it emits
//! one invalidation signal on the change channel after every successful
//! insert or update.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::util::{now_millis, snowflake_id};
use shared::{Order, OrderDraft, OrderStatus, Product, RepoError, RepoResult};

use super::OrderStore;
use crate::sync::OrderChannel;

pub struct MemoryOrderStore {
    orders: DashMap<i64, Order>,
    /// Catalog snapshot, fixed at construction (catalog management is
    /// an external concern)
    products: Vec<Product>,
    channel: OrderChannel,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            orders: DashMap::new(),
            products,
            channel: OrderChannel::new(),
        }
    }

    /// The change channel this store publishes invalidation signals on
    pub fn channel(&self) -> OrderChannel {
        self.channel.clone()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for MemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(&self, draft: OrderDraft) -> RepoResult<Order> {
        let mut id = snowflake_id();
        // Snowflake collisions are vanishingly rare at storefront scale
        // but cheap to rule out.
        while self.orders.contains_key(&id) {
            id = snowflake_id();
        }

        let order = Order {
            id,
            created_at: now_millis(),
            customer_name: draft.customer_name,
            customer_phone: draft.customer_phone,
            delivery: draft.delivery,
            payment_method: draft.payment_method,
            status: OrderStatus::Pending,
            total: draft.total,
            lines: draft.lines,
        };

        self.orders.insert(id, order.clone());
        tracing::info!(order_id = id, total = %order.total, "order created");
        self.channel.publish();
        Ok(order)
    }

    async fn get_order(&self, id: i64) -> RepoResult<Order> {
        self.orders
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> RepoResult<()> {
        // The entry guard is the per-order write lock: the status read
        // and write below are atomic with respect to concurrent
        // updates, which makes this the serialization point when two
        // dashboards race.
        let current = {
            let mut entry = self
                .orders
                .get_mut(&id)
                .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

            let current = entry.status;
            if current == status {
                // Same-target race: the desired end state is already in
                // place, overwrite harmlessly.
                return Ok(());
            }
            if !current.can_transition_to(status) {
                return Err(RepoError::Conflict(format!(
                    "order {id} is {current}, cannot become {status}"
                )));
            }
            entry.status = status;
            current
        };

        tracing::info!(order_id = id, from = %current, to = %status, "order status updated");
        self.channel.publish();
        Ok(())
    }

    async fn list_orders(&self) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(orders)
    }

    async fn list_products(&self) -> RepoResult<Vec<Product>> {
        let mut products = self.products.clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}
