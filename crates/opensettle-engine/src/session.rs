//! Identity boundary.
//!
//! Authentication happens upstream; the engine only ever sees trusted
//! numeric user ids. [`SessionAuthority`] is the seam the transport
//! boundary resolves a bearer credential through — including the
//! revocation check — before calling into the core. [`StaticSessions`]
//! is the stand-in that keeps the core testable without a real identity
//! service.

use std::collections::{HashMap, HashSet};

use opensettle_types::{Result, SettleError, UserId};

/// Capability to resolve a bearer credential to an authenticated user.
pub trait SessionAuthority {
    /// Resolve `bearer` to the user it authenticates.
    ///
    /// # Errors
    /// Returns [`SettleError::Unauthenticated`] for unknown or revoked
    /// credentials.
    fn authenticate(&self, bearer: &str) -> Result<UserId>;
}

/// Fixed credential table with a revocation list.
#[derive(Debug, Clone, Default)]
pub struct StaticSessions {
    sessions: HashMap<String, UserId>,
    revoked: HashSet<String>,
}

impl StaticSessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential for a user.
    pub fn insert(&mut self, bearer: impl Into<String>, user: UserId) {
        self.sessions.insert(bearer.into(), user);
    }

    /// Revoke a credential; subsequent authentication fails.
    pub fn revoke(&mut self, bearer: impl Into<String>) {
        self.revoked.insert(bearer.into());
    }
}

impl SessionAuthority for StaticSessions {
    fn authenticate(&self, bearer: &str) -> Result<UserId> {
        if self.revoked.contains(bearer) {
            return Err(SettleError::Unauthenticated {
                reason: "credential revoked".into(),
            });
        }
        self.sessions
            .get(bearer)
            .copied()
            .ok_or_else(|| SettleError::Unauthenticated {
                reason: "unknown credential".into(),
            })
    }
}
