//! Auth orchestration.
//!
//! Sequences sign-in, sign-up + profile completion, sign-out and
//! password reset against the auth backend, and owns every write to the
//! session holder apart from the remote-change bridge it spawns.

use crate::notify::Notifier;
use std::sync::Arc;
use tandem_core::auth::{AuthBackend, AuthChange};
use tandem_core::error::Result;
use tandem_core::session::SessionHolder;
use tandem_core::user::{Credentials, Principal, ProfileRepository, Registration, UserProfile};
use tokio::sync::broadcast;

/// Orchestrates authentication flows and session-state propagation.
pub struct AuthService {
    backend: Arc<dyn AuthBackend>,
    profiles: Arc<dyn ProfileRepository>,
    session: SessionHolder,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        profiles: Arc<dyn ProfileRepository>,
        session: SessionHolder,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend,
            profiles,
            session,
            notifier,
        }
    }

    /// The session holder this orchestrator writes to.
    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    /// Seeds the holder from an existing remote session at startup.
    ///
    /// Errors degrade to unauthenticated without a notification; the
    /// login view is the normal landing place for a fresh process.
    pub async fn bootstrap(&self) {
        match self.backend.current_principal().await {
            Ok(principal) => self.session.replace(principal),
            Err(err) => {
                tracing::debug!("session bootstrap failed: {err}");
                self.session.clear();
            }
        }
    }

    /// Signs a user in and marks the session authenticated.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Principal> {
        match self.backend.sign_in(credentials).await {
            Ok(principal) => {
                self.session.replace(Some(principal.clone()));
                self.notifier.success("Signed in successfully");
                Ok(principal)
            }
            Err(err) => {
                self.notifier.error(&format!("Sign-in failed: {err}"));
                Err(err)
            }
        }
    }

    /// Registers a new user: auth account first, then the profile record.
    ///
    /// The session is only marked authenticated once the profile write
    /// lands. A sign-up whose profile write fails leaves the remote auth
    /// account in place and the session unauthenticated; the failure is
    /// surfaced and the user can retry from the login view.
    pub async fn sign_up(&self, registration: &Registration) -> Result<Principal> {
        let principal = match self
            .backend
            .sign_up(&registration.email, &registration.password)
            .await
        {
            Ok(principal) => principal,
            Err(err) => {
                self.notifier.error(&format!("Could not create account: {err}"));
                return Err(err);
            }
        };

        let profile = UserProfile::for_registration(&principal, registration);
        if let Err(err) = self.profiles.upsert(&profile).await {
            self.notifier
                .error(&format!("Could not complete profile: {err}"));
            return Err(err);
        }

        self.session.replace(Some(principal.clone()));
        self.notifier.success("Account created successfully");
        Ok(principal)
    }

    /// Signs the current user out and clears the session.
    ///
    /// The `authenticated()` stream flipping to `false` is what sends
    /// the shell back to the login view.
    pub async fn sign_out(&self) -> Result<()> {
        match self.backend.sign_out().await {
            Ok(()) => {
                self.session.clear();
                self.notifier.success("Signed out successfully");
                Ok(())
            }
            Err(err) => {
                self.notifier.error(&format!("Sign-out failed: {err}"));
                Err(err)
            }
        }
    }

    /// Triggers the password-reset email flow.
    pub async fn request_password_reset(&self, email: &str) -> Result<()> {
        match self.backend.request_password_reset(email).await {
            Ok(()) => {
                self.notifier
                    .success("Password reset instructions sent by email");
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not send reset email: {err}"));
                Err(err)
            }
        }
    }

    /// Bridges out-of-band auth changes (silent refresh, expiry) from
    /// the backend into the session holder.
    pub fn watch_remote_changes(&self) -> tokio::task::JoinHandle<()> {
        let mut changes = self.backend.subscribe_changes();
        let session = self.session.clone();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(AuthChange::SignedIn { principal }) => session.replace(Some(principal)),
                    Ok(AuthChange::SignedOut) => session.clear(),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("auth change stream lagged, {skipped} events skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
