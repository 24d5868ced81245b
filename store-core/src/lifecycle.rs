//! Order lifecycle transitions
//!
//! The transition table itself lives on [`OrderStatus`]; this module
//! drives a single transition against the store. Transitions are
//! idempotent writes: issuing the same transition twice succeeds both
//! times without double-applying anything, and a race between two
//! dashboards resolves at the store's per-order serialization point.

use shared::{AppError, AppResult, OrderStatus, RepoError};

use crate::db::OrderStore;

/// Result of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status was written
    Applied(OrderStatus),
    /// The order was already in the requested status (possibly put
    /// there by a concurrent winner) — nothing to do, not an error
    NoOp(OrderStatus),
}

impl TransitionOutcome {
    pub fn status(&self) -> OrderStatus {
        match self {
            TransitionOutcome::Applied(s) | TransitionOutcome::NoOp(s) => *s,
        }
    }
}

/// Drive one status transition.
///
/// Guard policy: a target not in the allowed set for the order's
/// current status fails with [`AppError::InvalidTransition`] naming the
/// order id and both statuses — the stored state is never clamped,
/// coerced, or mutated on the error path.
pub async fn transition(
    store: &dyn OrderStore,
    order_id: i64,
    target: OrderStatus,
) -> AppResult<TransitionOutcome> {
    let order = store.get_order(order_id).await?;

    if order.status == target {
        tracing::debug!(order_id, status = %target, "transition already applied");
        return Ok(TransitionOutcome::NoOp(target));
    }
    if !order.status.can_transition_to(target) {
        return Err(AppError::invalid_transition(order_id, order.status, target));
    }

    match store.update_status(order_id, target).await {
        Ok(()) => {
            tracing::info!(order_id, from = %order.status, to = %target, "transition applied");
            Ok(TransitionOutcome::Applied(target))
        }
        // A concurrent writer got there first: the guard we evaluated
        // was stale. Re-fetch and decide against the fresh status.
        Err(RepoError::Conflict(_)) => {
            let fresh = store.get_order(order_id).await?;
            if fresh.status == target {
                tracing::debug!(order_id, status = %target, "lost transition race to same target");
                Ok(TransitionOutcome::NoOp(target))
            } else {
                Err(AppError::invalid_transition(order_id, fresh.status, target))
            }
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryOrderStore;
    use rust_decimal::Decimal;
    use shared::{DeliveryType, OrderDraft};
    use std::sync::Arc;

    async fn pending_order(store: &MemoryOrderStore) -> i64 {
        store
            .create_order(OrderDraft {
                customer_name: "Ana".into(),
                customer_phone: "11 99999-0000".into(),
                delivery: DeliveryType::Pickup,
                payment_method: "pix".into(),
                total: Decimal::new(2400, 2),
                lines: vec![],
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn accept_then_dispatch_then_complete() {
        let store = MemoryOrderStore::new();
        let id = pending_order(&store).await;

        for target in [
            OrderStatus::Preparing,
            OrderStatus::Delivering,
            OrderStatus::Completed,
        ] {
            let outcome = transition(&store, id, target).await.unwrap();
            assert_eq!(outcome, TransitionOutcome::Applied(target));
        }
        assert_eq!(
            store.get_order(id).await.unwrap().status,
            OrderStatus::Completed
        );
    }

    #[tokio::test]
    async fn illegal_jump_fails_and_leaves_status() {
        let store = MemoryOrderStore::new();
        let id = pending_order(&store).await;

        transition(&store, id, OrderStatus::Preparing)
            .await
            .unwrap();

        // preparing -> completed skips the pipeline.
        let err = transition(&store, id, OrderStatus::Completed)
            .await
            .unwrap_err();
        match err {
            AppError::InvalidTransition {
                order_id,
                from,
                to,
            } => {
                assert_eq!(order_id, id);
                assert_eq!(from, OrderStatus::Preparing);
                assert_eq!(to, OrderStatus::Completed);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
        assert_eq!(
            store.get_order(id).await.unwrap().status,
            OrderStatus::Preparing
        );
    }

    #[tokio::test]
    async fn repeating_a_transition_is_a_noop() {
        let store = MemoryOrderStore::new();
        let id = pending_order(&store).await;

        let first = transition(&store, id, OrderStatus::Preparing)
            .await
            .unwrap();
        let second = transition(&store, id, OrderStatus::Preparing)
            .await
            .unwrap();
        assert_eq!(first, TransitionOutcome::Applied(OrderStatus::Preparing));
        assert_eq!(second, TransitionOutcome::NoOp(OrderStatus::Preparing));
    }

    #[tokio::test]
    async fn terminal_states_reject_everything() {
        let store = MemoryOrderStore::new();
        let id = pending_order(&store).await;
        transition(&store, id, OrderStatus::Cancelled).await.unwrap();

        for target in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Delivering,
            OrderStatus::Completed,
        ] {
            assert!(transition(&store, id, target).await.is_err());
        }
    }

    #[tokio::test]
    async fn unknown_order_surfaces_not_found() {
        let store = MemoryOrderStore::new();
        let err = transition(&store, 424242, OrderStatus::Preparing)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Repository(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_same_target_race_yields_one_state_and_no_error() {
        let store = Arc::new(MemoryOrderStore::new());
        let id = pending_order(&store).await;

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                transition(store.as_ref(), id, OrderStatus::Preparing).await
            })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                transition(store.as_ref(), id, OrderStatus::Preparing).await
            })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        // Both succeed; exactly one persisted state results.
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(
            store.get_order(id).await.unwrap().status,
            OrderStatus::Preparing
        );
    }
}
