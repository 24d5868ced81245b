//! Order change channel
//!
//! # Architecture
//!
//! ```text
//! OrderStore (insert/update) ──► OrderChannel::publish
//!                                       │
//!                          broadcast::Sender<ChangeSignal>
//!                                       │
//!                    ┌──────────────────┼──────────────────┐
//!                    ▼                  ▼                  ▼
//!              Subscription       Subscription       Subscription
//!              (dashboard A)      (dashboard B)         ...
//! ```
//!
//! The channel carries coarse invalidation signals: a [`ChangeSignal`]
//! means "something about orders changed, refetch", never a row-level
//! delta. Delivery is at-least-once — a subscriber that lags behind the
//! broadcast buffer folds the missed signals into one more signal,
//! which is safe because every signal triggers the same full
//! refetch-and-replace. Ordering across signals is likewise not
//! guaranteed; the last refetch to complete wins.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Default capacity of the broadcast buffer
const DEFAULT_CAPACITY: usize = 64;

/// Contentless invalidation signal: "an order changed, refetch"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeSignal;

/// Fan-out channel for order invalidation signals
///
/// Cheap to clone; all clones share the same broadcast sender and
/// subscriber registry.
#[derive(Debug, Clone)]
pub struct OrderChannel {
    inner: Arc<ChannelInner>,
}

#[derive(Debug)]
struct ChannelInner {
    tx: broadcast::Sender<ChangeSignal>,
    /// Live subscription handles (Uuid -> ())
    subscribers: DashMap<Uuid, ()>,
}

impl OrderChannel {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            inner: Arc::new(ChannelInner {
                tx,
                subscribers: DashMap::new(),
            }),
        }
    }

    /// Publish an invalidation signal to every live subscriber.
    ///
    /// Publishing with no subscribers is not an error: the store keeps
    /// mutating orders whether or not a dashboard is watching.
    pub fn publish(&self) {
        if self.inner.tx.send(ChangeSignal).is_err() {
            tracing::debug!("order change signal dropped: no subscribers");
        }
    }

    /// Begin delivering invalidation signals to a new subscription.
    pub fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        self.inner.subscribers.insert(id, ());
        tracing::debug!(subscription = %id, "dashboard subscribed to order changes");
        Subscription {
            id,
            rx: self.inner.tx.subscribe(),
            channel: self.clone(),
        }
    }

    /// Stop delivery for a subscription. Idempotent and safe to call
    /// during teardown: unsubscribing an already-removed handle is a
    /// no-op.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        if self.inner.subscribers.remove(&subscription.id).is_some() {
            tracing::debug!(subscription = %subscription.id, "dashboard unsubscribed");
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    fn is_live(&self, id: &Uuid) -> bool {
        self.inner.subscribers.contains_key(id)
    }
}

impl Default for OrderChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// A live subscription to order change signals
///
/// Dropping the handle unsubscribes, so a dashboard torn down on an
/// error path cannot leak an open channel.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    rx: broadcast::Receiver<ChangeSignal>,
    channel: OrderChannel,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Receive the next invalidation signal.
    ///
    /// Returns `None` once the subscription was unsubscribed or the
    /// channel shut down. A lagged receiver collapses everything it
    /// missed into a single signal — the subscriber refetches either
    /// way.
    pub async fn recv(&mut self) -> Option<ChangeSignal> {
        if !self.channel.is_live(&self.id) {
            return None;
        }
        match self.rx.recv().await {
            Ok(signal) => {
                if !self.channel.is_live(&self.id) {
                    return None;
                }
                Some(signal)
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "subscription lagged, collapsing into one refetch");
                Some(ChangeSignal)
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.channel.inner.subscribers.remove(&self.id).is_some() {
            tracing::debug!(subscription = %self.id, "subscription dropped, unsubscribed");
        }
    }
}
