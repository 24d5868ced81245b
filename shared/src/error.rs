//! Unified error system for the Brasa order platform
//!
//! Two layers, converted upward with `?`:
//!
//! - [`RepoError`]: failures of the order store. Not-found and
//!   constraint violations are distinct variants so callers can react
//!   differently to "the row is gone" vs "the write lost a race" vs
//!   "the transport failed".
//! - [`AppError`]: everything the core surfaces to a caller — input
//!   validation, illegal lifecycle transitions, store failures, the
//!   best-effort notification hand-off, and missing dashboard sessions.

use crate::models::OrderStatus;
use thiserror::Error;

/// Order store error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write violated a store-enforced constraint (e.g. the closed
    /// status transition table at the per-order serialization point).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for store operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Unified error type for the order core
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart selection or checkout field rejected before any store call
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Requested status is not reachable from the order's current status.
    /// Never mutates stored state.
    #[error("Invalid transition for order {order_id}: {from} -> {to}")]
    InvalidTransition {
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Store call failed; checkout aborts entirely, a failed status
    /// update leaves the prior status in place.
    #[error(transparent)]
    Repository(#[from] RepoError),

    /// Notification hand-off failed after a successful order creation.
    /// The order stands; this is reported, never rolled back.
    #[error("Hand-off error: {message}")]
    Handoff { message: String },

    /// No dashboard session
    #[error("Authentication required")]
    Unauthorized,
}

impl AppError {
    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(order_id: i64, from: OrderStatus, to: OrderStatus) -> Self {
        Self::InvalidTransition { order_id, from, to }
    }

    /// Create a Handoff error
    pub fn handoff(message: impl Into<String>) -> Self {
        Self::Handoff {
            message: message.into(),
        }
    }

    /// True when the error only concerns the post-creation hand-off
    pub fn is_handoff(&self) -> bool {
        matches!(self, Self::Handoff { .. })
    }
}

/// Result type for order core operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_all_three_parts() {
        let err = AppError::invalid_transition(42, OrderStatus::Pending, OrderStatus::Completed);
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("pending"));
        assert!(msg.contains("completed"));
    }

    #[test]
    fn repo_errors_stay_distinct_through_conversion() {
        let not_found: AppError = RepoError::NotFound("order 7".into()).into();
        let conflict: AppError = RepoError::Conflict("status".into()).into();
        assert!(matches!(
            not_found,
            AppError::Repository(RepoError::NotFound(_))
        ));
        assert!(matches!(
            conflict,
            AppError::Repository(RepoError::Conflict(_))
        ));
    }
}
