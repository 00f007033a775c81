//! Service wiring.
//!
//! Builds the full service graph over one remote store client. A shell
//! calls [`Services::build`] once at startup, then hands each service to
//! the views that need it; the shared [`SessionHolder`] drives the
//! authenticated/login toggle.

use crate::account_service::AccountService;
use crate::auth_service::AuthService;
use crate::category_service::CategoryService;
use crate::notify::Notifier;
use crate::transaction_service::TransactionService;
use std::sync::Arc;
use tandem_core::config::RemoteConfig;
use tandem_core::error::Result;
use tandem_core::session::SessionHolder;
use tandem_infrastructure::{
    RemoteAccountRepository, RemoteCategoryRepository, RemoteIdentityDirectory,
    RemoteProfileRepository, RemoteStore, RemoteTransactionRepository,
};

/// The wired service graph.
pub struct Services {
    pub session: SessionHolder,
    pub auth: AuthService,
    pub accounts: AccountService,
    pub transactions: TransactionService,
    pub categories: CategoryService,
}

impl Services {
    /// Wires every service against one remote store client.
    pub fn build(config: &RemoteConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let store = Arc::new(RemoteStore::new(config)?);
        let session = SessionHolder::new();

        let auth = AuthService::new(
            store.clone(),
            Arc::new(RemoteProfileRepository::new(store.clone())),
            session.clone(),
            notifier.clone(),
        );
        let accounts = AccountService::new(
            Arc::new(RemoteAccountRepository::new(store.clone())),
            Arc::new(RemoteIdentityDirectory::new(store.clone())),
            session.clone(),
            notifier.clone(),
        );
        let transactions = TransactionService::new(
            Arc::new(RemoteTransactionRepository::new(store.clone())),
            session.clone(),
            notifier.clone(),
        );
        let categories = CategoryService::new(
            Arc::new(RemoteCategoryRepository::new(store)),
            notifier,
        );

        Ok(Self {
            session,
            auth,
            accounts,
            transactions,
            categories,
        })
    }

    /// Seeds the session from any existing remote session and starts the
    /// auth-change bridge.
    pub async fn start(&self) -> tokio::task::JoinHandle<()> {
        self.auth.bootstrap().await;
        self.auth.watch_remote_changes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TracingNotifier;

    #[test]
    fn test_build_wires_against_a_valid_config() {
        let config = RemoteConfig::new("https://example.supabase.co", "anon-key");
        let services = Services::build(&config, Arc::new(TracingNotifier)).unwrap();
        assert!(!services.session.is_authenticated());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = RemoteConfig::new("", "anon-key");
        assert!(Services::build(&config, Arc::new(TracingNotifier)).is_err());
    }
}
