//! Dashboard auth gate
//!
//! Credential verification and session issuance are external; the
//! dashboard only asks "is there a session right now?". Absence of a
//! session denies dashboard access — the subscription and status
//! transitions — and never gates pricing or cart logic, which run
//! pre-authentication on the storefront side.

use std::sync::Mutex;

/// An authenticated staff session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub staff_name: String,
}

/// Session lookup, implemented by the external auth collaborator
pub trait AuthGate: Send + Sync {
    fn current_session(&self) -> Option<Session>;
}

/// In-process auth gate holding at most one session
pub struct MemoryAuthGate {
    session: Mutex<Option<Session>>,
}

impl MemoryAuthGate {
    /// Gate with no session: all dashboard access denied
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    /// Gate with a signed-in staff member
    pub fn signed_in(staff_name: impl Into<String>) -> Self {
        let gate = Self::new();
        gate.sign_in(staff_name);
        gate
    }

    pub fn sign_in(&self, staff_name: impl Into<String>) {
        *self.session.lock().unwrap() = Some(Session {
            staff_name: staff_name.into(),
        });
    }

    pub fn sign_out(&self) {
        *self.session.lock().unwrap() = None;
    }
}

impl Default for MemoryAuthGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGate for MemoryAuthGate {
    fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}
