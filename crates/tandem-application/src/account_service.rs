//! Account access service.

use crate::notify::Notifier;
use std::sync::Arc;
use tandem_core::account::{
    Account, AccountCreated, AccountDraft, AccountPatch, AccountRepository, InviteOutcome,
    NewAccount,
};
use tandem_core::error::{Result, TandemError};
use tandem_core::session::SessionHolder;
use tandem_core::user::{IdentityDirectory, Principal};
use uuid::Uuid;

/// CRUD over shared accounts, with partner-invite resolution.
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    directory: Arc<dyn IdentityDirectory>,
    session: SessionHolder,
    notifier: Arc<dyn Notifier>,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        directory: Arc<dyn IdentityDirectory>,
        session: SessionHolder,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            accounts,
            directory,
            session,
            notifier,
        }
    }

    fn require_principal(&self) -> Result<Principal> {
        self.session.current().ok_or_else(|| {
            let err = TandemError::auth("no signed-in user");
            self.notifier.error("You need to sign in first");
            err
        })
    }

    /// Accounts the signed-in user is a member of, newest first.
    pub async fn list(&self) -> Result<Vec<Account>> {
        let principal = self.require_principal()?;
        match self.accounts.list(principal.id).await {
            Ok(accounts) => Ok(accounts),
            Err(err) => {
                self.notifier
                    .error(&format!("Could not load accounts: {err}"));
                Err(err)
            }
        }
    }

    /// A single account by id.
    pub async fn get(&self, id: Uuid) -> Result<Account> {
        let result = match self.accounts.find_by_id(id).await {
            Ok(Some(account)) => return Ok(account),
            Ok(None) => Err(TandemError::not_found("account", id.to_string())),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            self.notifier
                .error(&format!("Could not load account details: {err}"));
        }
        result
    }

    /// Creates an account, resolving an optional partner-invite email.
    ///
    /// An invite email that matches no identity is dropped without
    /// error; the returned [`InviteOutcome`] makes that visible.
    pub async fn create(&self, draft: &AccountDraft) -> Result<AccountCreated> {
        let principal = self.require_principal()?;
        let (partner_id, invite) = self
            .resolve_partner(draft.partner_email.as_deref())
            .await?;

        let new_account = NewAccount {
            name: draft.name.clone(),
            opening_balance: draft.opening_balance,
            owner_id: principal.id,
            partner_id,
        };

        match self.accounts.insert(&new_account).await {
            Ok(account) => {
                self.notifier.success("Account created successfully");
                Ok(AccountCreated { account, invite })
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not create account: {err}"));
                Err(err)
            }
        }
    }

    /// Overwrites an account's name, opening balance and partner.
    ///
    /// Scoped remotely to accounts the signed-in user is a member of.
    pub async fn update(&self, id: Uuid, draft: &AccountDraft) -> Result<InviteOutcome> {
        let principal = self.require_principal()?;
        let (partner_id, invite) = self
            .resolve_partner(draft.partner_email.as_deref())
            .await?;

        let patch = AccountPatch {
            name: draft.name.clone(),
            opening_balance: draft.opening_balance,
            partner_id,
        };

        match self.accounts.update(id, principal.id, &patch).await {
            Ok(()) => {
                self.notifier.success("Account updated successfully");
                Ok(invite)
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not update account: {err}"));
                Err(err)
            }
        }
    }

    /// Deletes an account the signed-in user is a member of.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let principal = self.require_principal()?;
        match self.accounts.delete(id, principal.id).await {
            Ok(()) => {
                self.notifier.success("Account deleted successfully");
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not delete account: {err}"));
                Err(err)
            }
        }
    }

    async fn resolve_partner(
        &self,
        email: Option<&str>,
    ) -> Result<(Option<Uuid>, InviteOutcome)> {
        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return Ok((None, InviteOutcome::NotRequested));
        };
        match self.directory.find_user_id(email).await? {
            Some(partner_id) => Ok((Some(partner_id), InviteOutcome::Resolved)),
            None => {
                tracing::debug!("partner email did not match an identity, invite dropped");
                Ok((None, InviteOutcome::Unresolved))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockAccountRepository {
        accounts: Mutex<HashMap<Uuid, Account>>,
    }

    impl MockAccountRepository {
        fn new() -> Self {
            Self {
                accounts: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn list(&self, member_id: Uuid) -> tandem_core::Result<Vec<Account>> {
            let accounts = self.accounts.lock().unwrap();
            let mut visible: Vec<Account> = accounts
                .values()
                .filter(|a| a.is_member(member_id))
                .cloned()
                .collect();
            visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(visible)
        }

        async fn find_by_id(&self, id: Uuid) -> tandem_core::Result<Option<Account>> {
            Ok(self.accounts.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, account: &NewAccount) -> tandem_core::Result<Account> {
            let created = Account {
                id: Uuid::new_v4(),
                name: account.name.clone(),
                opening_balance: account.opening_balance,
                current_balance: account.opening_balance,
                created_at: Utc::now(),
                updated_at: Utc::now(),
                owner_id: account.owner_id,
                partner_id: account.partner_id,
            };
            self.accounts
                .lock()
                .unwrap()
                .insert(created.id, created.clone());
            Ok(created)
        }

        async fn update(
            &self,
            id: Uuid,
            member_id: Uuid,
            patch: &AccountPatch,
        ) -> tandem_core::Result<()> {
            let mut accounts = self.accounts.lock().unwrap();
            match accounts.get_mut(&id).filter(|a| a.is_member(member_id)) {
                Some(account) => {
                    account.name = patch.name.clone();
                    account.opening_balance = patch.opening_balance;
                    account.partner_id = patch.partner_id;
                    account.updated_at = Utc::now();
                    Ok(())
                }
                None => Err(TandemError::unauthorized(format!(
                    "account {id} is not editable by this user"
                ))),
            }
        }

        async fn delete(&self, id: Uuid, member_id: Uuid) -> tandem_core::Result<()> {
            let mut accounts = self.accounts.lock().unwrap();
            let allowed = accounts
                .get(&id)
                .is_some_and(|a| a.is_member(member_id));
            if !allowed {
                return Err(TandemError::unauthorized(format!(
                    "account {id} is not deletable by this user"
                )));
            }
            accounts.remove(&id);
            Ok(())
        }
    }

    struct MockIdentityDirectory {
        identities: HashMap<String, Uuid>,
    }

    #[async_trait]
    impl IdentityDirectory for MockIdentityDirectory {
        async fn find_user_id(&self, email: &str) -> tandem_core::Result<Option<Uuid>> {
            Ok(self.identities.get(email).copied())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        errors: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, _message: &str) {}

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    fn signed_in_session() -> (SessionHolder, Principal) {
        let principal = Principal {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
        };
        let session = SessionHolder::new();
        session.replace(Some(principal.clone()));
        (session, principal)
    }

    fn service_with_identities(
        identities: HashMap<String, Uuid>,
    ) -> (AccountService, SessionHolder, Principal) {
        let (session, principal) = signed_in_session();
        let service = AccountService::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(MockIdentityDirectory { identities }),
            session.clone(),
            Arc::new(RecordingNotifier::default()),
        );
        (service, session, principal)
    }

    fn draft(partner_email: Option<&str>) -> AccountDraft {
        AccountDraft {
            name: "Joint".to_string(),
            opening_balance: Decimal::new(10_000, 2),
            partner_email: partner_email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_resolves_matching_partner_email() {
        let partner_id = Uuid::new_v4();
        let mut identities = HashMap::new();
        identities.insert("bruno@example.com".to_string(), partner_id);
        let (service, _, principal) = service_with_identities(identities);

        let created = service
            .create(&draft(Some("bruno@example.com")))
            .await
            .unwrap();
        assert_eq!(created.invite, InviteOutcome::Resolved);
        assert_eq!(created.account.owner_id, principal.id);
        assert_eq!(created.account.partner_id, Some(partner_id));
    }

    #[tokio::test]
    async fn test_create_with_unmatched_email_succeeds_without_partner() {
        let (service, _, _) = service_with_identities(HashMap::new());

        let created = service
            .create(&draft(Some("nobody@example.com")))
            .await
            .unwrap();
        assert_eq!(created.invite, InviteOutcome::Unresolved);
        assert!(created.account.partner_id.is_none());
    }

    #[tokio::test]
    async fn test_create_without_email_requests_no_invite() {
        let (service, _, _) = service_with_identities(HashMap::new());

        let created = service.create(&draft(None)).await.unwrap();
        assert_eq!(created.invite, InviteOutcome::NotRequested);
        assert!(created.account.partner_id.is_none());
    }

    #[tokio::test]
    async fn test_operations_require_a_signed_in_user() {
        let service = AccountService::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(MockIdentityDirectory {
                identities: HashMap::new(),
            }),
            SessionHolder::new(),
            Arc::new(RecordingNotifier::default()),
        );

        assert!(matches!(
            service.create(&draft(None)).await.unwrap_err(),
            TandemError::Auth(_)
        ));
        assert!(matches!(
            service.list().await.unwrap_err(),
            TandemError::Auth(_)
        ));
    }

    #[tokio::test]
    async fn test_list_returns_only_member_accounts() {
        let (service, session, _) = service_with_identities(HashMap::new());
        service.create(&draft(None)).await.unwrap();

        // Another user's account is invisible.
        let other = Principal {
            id: Uuid::new_v4(),
            email: "carla@example.com".to_string(),
        };
        let mine = service.list().await.unwrap();
        assert_eq!(mine.len(), 1);

        session.replace(Some(other));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_non_member_is_unauthorized() {
        let (service, session, _) = service_with_identities(HashMap::new());
        let created = service.create(&draft(None)).await.unwrap();

        session.replace(Some(Principal {
            id: Uuid::new_v4(),
            email: "carla@example.com".to_string(),
        }));
        let err = service
            .update(created.account.id, &draft(None))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_get_missing_account_is_not_found() {
        let (service, _, _) = service_with_identities(HashMap::new());
        let err = service.get(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
