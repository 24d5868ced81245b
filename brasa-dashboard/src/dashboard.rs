//! Staff dashboard projection
//!
//! # Reconciliation
//!
//! ```text
//! OrderChannel signal ──► reconcile(): list_orders (newest first)
//!                                │
//!                                ▼
//!                  wholesale replace of the projection
//! ```
//!
//! The projection is only ever replaced as a whole, never merged
//! field-by-field, so a stale partial write can never clobber a newer
//! field. Reconciliation is a pure refetch and therefore safe to run
//! redundantly — at-least-once signal delivery and out-of-order
//! signals cost nothing beyond an extra fetch; the last refetch to
//! complete wins.

use std::sync::Arc;

use shared::{AppError, AppResult, Order, OrderStatus};
use store_core::lifecycle::{self, TransitionOutcome};
use store_core::sync::{OrderChannel, Subscription};
use store_core::OrderStore;
use tokio_util::sync::CancellationToken;

use crate::auth::AuthGate;

/// Kanban columns of the live pipeline. Terminal orders leave the
/// board.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub delivering: Vec<Order>,
}

/// One staff member's live view of the order pipeline
pub struct Dashboard {
    gate: Arc<dyn AuthGate>,
    store: Arc<dyn OrderStore>,
    channel: OrderChannel,
    subscription: Option<Subscription>,
    orders: Vec<Order>,
}

impl Dashboard {
    /// Open a dashboard: requires a session, subscribes to order
    /// changes, and loads the initial projection.
    pub async fn open(
        gate: Arc<dyn AuthGate>,
        store: Arc<dyn OrderStore>,
        channel: OrderChannel,
    ) -> AppResult<Self> {
        let session = gate.current_session().ok_or(AppError::Unauthorized)?;
        tracing::info!(staff = %session.staff_name, "dashboard opened");

        let subscription = channel.subscribe();
        let mut dashboard = Self {
            gate,
            store,
            channel,
            subscription: Some(subscription),
            orders: Vec::new(),
        };
        dashboard.reconcile().await?;
        Ok(dashboard)
    }

    /// Full refetch-and-replace of the projection.
    pub async fn reconcile(&mut self) -> AppResult<()> {
        self.orders = self.store.list_orders().await?;
        Ok(())
    }

    /// The current projection, newest order first
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The projection grouped into pipeline columns
    pub fn board(&self) -> BoardView {
        let mut board = BoardView::default();
        for order in &self.orders {
            match order.status {
                OrderStatus::Pending => board.pending.push(order.clone()),
                OrderStatus::Preparing => board.preparing.push(order.clone()),
                OrderStatus::Delivering => board.delivering.push(order.clone()),
                OrderStatus::Completed | OrderStatus::Cancelled => {}
            }
        }
        board
    }

    /// Staff action: drive one status transition.
    ///
    /// The local projection is deliberately untouched here — the store
    /// fans out a signal and the refetch moves the order. On failure
    /// the order therefore stays visible in its prior column.
    pub async fn update_status(
        &self,
        order_id: i64,
        target: OrderStatus,
    ) -> AppResult<TransitionOutcome> {
        let session = self.gate.current_session().ok_or(AppError::Unauthorized)?;
        tracing::debug!(staff = %session.staff_name, order_id, target = %target, "transition requested");
        lifecycle::transition(self.store.as_ref(), order_id, target).await
    }

    /// Signal loop: reconcile on every invalidation signal until the
    /// shutdown token fires or the channel closes. Unsubscribes on
    /// every exit path, including errors.
    pub async fn run(&mut self, shutdown: CancellationToken) -> AppResult<()> {
        let Some(mut subscription) = self.subscription.take() else {
            return Ok(());
        };

        let result = loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("dashboard shutting down");
                    break Ok(());
                }
                signal = subscription.recv() => match signal {
                    Some(_) => {
                        if let Err(e) = self.reconcile().await {
                            break Err(e);
                        }
                    }
                    None => break Ok(()),
                }
            }
        };

        self.channel.unsubscribe(&subscription);
        result
    }

    /// Tear the view down, releasing the subscription. Idempotent.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.channel.unsubscribe(&subscription);
        }
    }
}

impl Drop for Dashboard {
    // The subscription handle also unsubscribes on drop; close() here
    // keeps teardown explicit on the normal path.
    fn drop(&mut self) {
        self.close();
    }
}
