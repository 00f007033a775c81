//! In-memory session state.
//!
//! The [`SessionHolder`] is the tab-lifetime record of the current
//! authenticated principal. It is written by the auth orchestrator on
//! explicit sign-in/sign-up/sign-out completions and by the remote
//! auth-change bridge on silent refresh or expiry; everything else only
//! reads it, either as a snapshot or as a replay-latest stream.

use crate::user::Principal;
use std::sync::Arc;
use tokio::sync::watch;

/// Process-wide holder of the current authenticated principal.
///
/// Cloning the holder is cheap and every clone observes the same state.
/// Updates are last-write-wins whole-value replacements; new subscribers
/// immediately see the latest value.
#[derive(Clone)]
pub struct SessionHolder {
    principal_tx: Arc<watch::Sender<Option<Principal>>>,
    authenticated_tx: Arc<watch::Sender<bool>>,
}

impl SessionHolder {
    /// Creates a holder with no signed-in principal.
    pub fn new() -> Self {
        let (principal_tx, _) = watch::channel(None);
        let (authenticated_tx, _) = watch::channel(false);
        Self {
            principal_tx: Arc::new(principal_tx),
            authenticated_tx: Arc::new(authenticated_tx),
        }
    }

    /// Synchronous snapshot of the current principal.
    pub fn current(&self) -> Option<Principal> {
        self.principal_tx.borrow().clone()
    }

    /// Snapshot of the derived authentication flag.
    pub fn is_authenticated(&self) -> bool {
        *self.authenticated_tx.borrow()
    }

    /// Stream of principal changes, replaying the latest value to each
    /// new subscriber.
    pub fn subscribe(&self) -> watch::Receiver<Option<Principal>> {
        self.principal_tx.subscribe()
    }

    /// Stream of the derived `authenticated` boolean, replaying the
    /// latest value to each new subscriber.
    ///
    /// The navigation shell watches this to toggle between the
    /// authenticated UI and the login view.
    pub fn authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated_tx.subscribe()
    }

    /// Overwrites the snapshot and publishes to both streams.
    pub fn replace(&self, principal: Option<Principal>) {
        let authenticated = principal.is_some();
        self.principal_tx.send_replace(principal);
        self.authenticated_tx.send_replace(authenticated);
    }

    /// Clears the snapshot back to unauthenticated.
    pub fn clear(&self) {
        self.replace(None);
    }
}

impl Default for SessionHolder {
    fn default() -> Self {
        Self::new()
    }
}
