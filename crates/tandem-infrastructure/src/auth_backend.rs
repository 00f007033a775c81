//! AuthBackend implementation over the remote store.

use crate::remote::RemoteStore;
use async_trait::async_trait;
use tandem_core::auth::{AuthBackend, AuthChange};
use tandem_core::error::Result;
use tandem_core::user::{Credentials, Principal};
use tokio::sync::broadcast;

#[async_trait]
impl AuthBackend for RemoteStore {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Principal> {
        RemoteStore::sign_in(self, &credentials.email, &credentials.password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal> {
        RemoteStore::sign_up(self, email, password).await
    }

    async fn sign_out(&self) -> Result<()> {
        RemoteStore::sign_out(self).await
    }

    async fn current_principal(&self) -> Result<Option<Principal>> {
        Ok(RemoteStore::current_principal(self).await)
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        RemoteStore::request_password_reset(self, email).await
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<AuthChange> {
        RemoteStore::subscribe_changes(self)
    }
}
