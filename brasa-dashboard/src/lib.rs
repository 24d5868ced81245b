//! Brasa Dashboard - staff view of the live order pipeline
//!
//! A dashboard is a read-only projection of the order store, kept
//! consistent through the coarse invalidation channel: every signal
//! triggers a full refetch that replaces the projection wholesale.
//! Staff drive order status transitions from here; access is gated by
//! a session from the auth collaborator.

pub mod auth;
pub mod dashboard;

pub use auth::{AuthGate, MemoryAuthGate, Session};
pub use dashboard::{BoardView, Dashboard};
