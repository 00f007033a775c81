//! Auth backend contract.
//!
//! Defines the interface the auth orchestrator drives, decoupling it from
//! the concrete remote store client (and from in-memory fakes in tests).

use crate::error::Result;
use crate::user::{Credentials, Principal};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Out-of-band auth-state change pushed by the remote store client.
///
/// These are the changes the orchestrator did not itself initiate: a
/// silent token refresh re-establishing the session, or an expiry ending
/// it. Explicit sign-in/sign-out completions are not republished here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthChange {
    /// A session was (re-)established for this principal.
    SignedIn { principal: Principal },
    /// The session ended (expiry, failed refresh).
    SignedOut,
}

/// Auth primitives of the remote store.
///
/// Each operation is an asynchronous one-shot result; no retry is
/// performed at this layer.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchanges credentials for an authenticated principal.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal>;

    /// Creates a new auth account and returns the new principal.
    ///
    /// Profile completion (name fields) is the orchestrator's concern and
    /// happens in a separate step after this call succeeds.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal>;

    /// Ends the current session on the remote side.
    async fn sign_out(&self) -> Result<()>;

    /// Returns the principal of the current session, if one exists.
    async fn current_principal(&self) -> Result<Option<Principal>>;

    /// Triggers the remote password-reset flow for an email.
    async fn request_password_reset(&self, email: &str) -> Result<()>;

    /// Subscribes to out-of-band auth-state changes.
    fn subscribe_changes(&self) -> broadcast::Receiver<AuthChange>;
}
