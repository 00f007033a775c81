//! End-to-end flow over in-memory fakes: register, share an account,
//! record spending from both sides, sign out.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tandem_application::{
    AccountService, AuthService, Notifier, TransactionService,
};
use tandem_core::account::{
    Account, AccountDraft, AccountPatch, AccountRepository, InviteOutcome, NewAccount,
};
use tandem_core::auth::{AuthBackend, AuthChange};
use tandem_core::error::TandemError;
use tandem_core::session::SessionHolder;
use tandem_core::transaction::{
    NewTransaction, Transaction, TransactionDraft, TransactionFilter, TransactionKind,
    TransactionPatch, TransactionRepository,
};
use tandem_core::user::{
    Credentials, IdentityDirectory, Principal, ProfileRepository, UserProfile,
};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Fake remote auth: any credentials matching a registered identity work.
struct FakeAuth {
    identities: Mutex<HashMap<String, Uuid>>,
    changes: broadcast::Sender<AuthChange>,
}

impl FakeAuth {
    fn new() -> Self {
        let (changes, _) = broadcast::channel(8);
        Self {
            identities: Mutex::new(HashMap::new()),
            changes,
        }
    }

    fn register(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.identities.lock().unwrap().insert(email.to_string(), id);
        id
    }
}

#[async_trait]
impl AuthBackend for FakeAuth {
    async fn sign_in(&self, credentials: &Credentials) -> tandem_core::Result<Principal> {
        let identities = self.identities.lock().unwrap();
        match identities.get(&credentials.email) {
            Some(id) => Ok(Principal {
                id: *id,
                email: credentials.email.clone(),
            }),
            None => Err(TandemError::auth("Invalid login credentials")),
        }
    }

    async fn sign_up(&self, email: &str, _password: &str) -> tandem_core::Result<Principal> {
        let id = self.register(email);
        Ok(Principal {
            id,
            email: email.to_string(),
        })
    }

    async fn sign_out(&self) -> tandem_core::Result<()> {
        Ok(())
    }

    async fn current_principal(&self) -> tandem_core::Result<Option<Principal>> {
        Ok(None)
    }

    async fn request_password_reset(&self, _email: &str) -> tandem_core::Result<()> {
        Ok(())
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }
}

#[async_trait]
impl IdentityDirectory for FakeAuth {
    async fn find_user_id(&self, email: &str) -> tandem_core::Result<Option<Uuid>> {
        Ok(self.identities.lock().unwrap().get(email).copied())
    }
}

struct FakeProfiles {
    rows: Mutex<HashMap<Uuid, UserProfile>>,
}

#[async_trait]
impl ProfileRepository for FakeProfiles {
    async fn upsert(&self, profile: &UserProfile) -> tandem_core::Result<()> {
        self.rows.lock().unwrap().insert(profile.id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> tandem_core::Result<Option<UserProfile>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}

struct FakeAccounts {
    rows: Mutex<HashMap<Uuid, Account>>,
}

#[async_trait]
impl AccountRepository for FakeAccounts {
    async fn list(&self, member_id: Uuid) -> tandem_core::Result<Vec<Account>> {
        let rows = self.rows.lock().unwrap();
        let mut visible: Vec<Account> = rows
            .values()
            .filter(|a| a.is_member(member_id))
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    async fn find_by_id(&self, id: Uuid) -> tandem_core::Result<Option<Account>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
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
        self.rows.lock().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        member_id: Uuid,
        patch: &AccountPatch,
    ) -> tandem_core::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id).filter(|a| a.is_member(member_id)) {
            Some(account) => {
                account.name = patch.name.clone();
                account.opening_balance = patch.opening_balance;
                account.partner_id = patch.partner_id;
                Ok(())
            }
            None => Err(TandemError::unauthorized("account is not editable")),
        }
    }

    async fn delete(&self, id: Uuid, member_id: Uuid) -> tandem_core::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.get(&id).is_some_and(|a| a.is_member(member_id)) {
            return Err(TandemError::unauthorized("account is not deletable"));
        }
        rows.remove(&id);
        Ok(())
    }
}

struct FakeTransactions {
    rows: Mutex<HashMap<Uuid, Transaction>>,
}

#[async_trait]
impl TransactionRepository for FakeTransactions {
    async fn list(&self, filter: &TransactionFilter) -> tandem_core::Result<Vec<Transaction>> {
        let rows = self.rows.lock().unwrap();
        let mut matching: Vec<Transaction> =
            rows.values().filter(|tx| filter.matches(tx)).cloned().collect();
        matching.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(matching)
    }

    async fn find_by_id(&self, id: Uuid) -> tandem_core::Result<Option<Transaction>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, transaction: &NewTransaction) -> tandem_core::Result<Transaction> {
        let draft = &transaction.draft;
        let created = Transaction {
            id: Uuid::new_v4(),
            account_id: draft.account_id,
            creator_id: transaction.creator_id,
            description: draft.description.clone(),
            amount: draft.amount,
            date: draft.date,
            kind: draft.kind,
            category: draft.category.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.rows.lock().unwrap().insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        creator_id: Uuid,
        patch: &TransactionPatch,
    ) -> tandem_core::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id).filter(|tx| tx.creator_id == creator_id) {
            Some(tx) => {
                tx.description = patch.description.clone();
                tx.amount = patch.amount;
                Ok(())
            }
            None => Err(TandemError::unauthorized("transaction is not editable")),
        }
    }

    async fn delete(&self, id: Uuid, creator_id: Uuid) -> tandem_core::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.get(&id).is_some_and(|tx| tx.creator_id == creator_id) {
            return Err(TandemError::unauthorized("transaction is not deletable"));
        }
        rows.remove(&id);
        Ok(())
    }
}

struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

struct Harness {
    session: SessionHolder,
    auth: AuthService,
    accounts: AccountService,
    transactions: TransactionService,
    backend: Arc<FakeAuth>,
}

fn harness() -> Harness {
    let backend = Arc::new(FakeAuth::new());
    let session = SessionHolder::new();
    let notifier = Arc::new(SilentNotifier);
    let transactions_repo = Arc::new(FakeTransactions {
        rows: Mutex::new(HashMap::new()),
    });

    Harness {
        session: session.clone(),
        auth: AuthService::new(
            backend.clone(),
            Arc::new(FakeProfiles {
                rows: Mutex::new(HashMap::new()),
            }),
            session.clone(),
            notifier.clone(),
        ),
        accounts: AccountService::new(
            Arc::new(FakeAccounts {
                rows: Mutex::new(HashMap::new()),
            }),
            backend.clone(),
            session.clone(),
            notifier.clone(),
        ),
        transactions: TransactionService::new(transactions_repo, session, notifier),
        backend,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
}

#[tokio::test]
async fn test_two_owner_household_flow() {
    let h = harness();

    // Both partners already have identities; Ana signs in.
    h.backend.register("ana@example.com");
    h.backend.register("bruno@example.com");
    let ana = h
        .auth
        .sign_in(&Credentials {
            email: "ana@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    assert!(h.session.is_authenticated());

    // Ana opens a shared account and invites Bruno by email.
    let created = h
        .accounts
        .create(&AccountDraft {
            name: "Household".to_string(),
            opening_balance: Decimal::new(50_000, 2),
            partner_email: Some("bruno@example.com".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.invite, InviteOutcome::Resolved);
    let account = created.account;
    assert_eq!(account.owner_id, ana.id);
    assert!(account.partner_id.is_some());

    // Ana records rent, Bruno records groceries.
    h.transactions
        .create(&TransactionDraft {
            account_id: account.id,
            description: "rent".to_string(),
            amount: Decimal::new(120_000, 2),
            date: day(1),
            kind: TransactionKind::Outflow,
            category: "Housing".to_string(),
        })
        .await
        .unwrap();

    let ana_tx = h
        .transactions
        .create(&TransactionDraft {
            account_id: account.id,
            description: "salary".to_string(),
            amount: Decimal::new(300_000, 2),
            date: day(5),
            kind: TransactionKind::Inflow,
            category: "Other".to_string(),
        })
        .await
        .unwrap();

    let bruno = h
        .auth
        .sign_in(&Credentials {
            email: "bruno@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    assert_ne!(bruno.id, ana.id);

    h.transactions
        .create(&TransactionDraft {
            account_id: account.id,
            description: "groceries".to_string(),
            amount: Decimal::new(8_000, 2),
            date: day(7),
            kind: TransactionKind::Outflow,
            category: "Groceries".to_string(),
        })
        .await
        .unwrap();

    // Bruno sees the whole account history, newest date first.
    let history = h
        .transactions
        .list(&TransactionFilter::for_account(account.id))
        .await
        .unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].description, "groceries");
    assert_eq!(history[2].description, "rent");

    // But cannot touch Ana's entries.
    assert!(
        h.transactions
            .delete(ana_tx.id)
            .await
            .unwrap_err()
            .is_unauthorized()
    );

    // The shared account is editable from Bruno's side.
    h.accounts
        .update(
            account.id,
            &AccountDraft {
                name: "Household 2025".to_string(),
                opening_balance: Decimal::new(50_000, 2),
                partner_email: Some("ana@example.com".to_string()),
            },
        )
        .await
        .unwrap();

    // The per-category summary reflects everyone's entries.
    let summary = h
        .transactions
        .summarize_by_category(account.id, None)
        .await
        .unwrap();
    let housing = summary.iter().find(|s| s.category == "Housing").unwrap();
    assert_eq!(housing.net, Decimal::new(-120_000, 2));

    // Sign-out flips the shell back to the login view.
    let mut authenticated = h.session.authenticated();
    h.auth.sign_out().await.unwrap();
    assert!(!*authenticated.borrow_and_update());
    assert!(h.session.current().is_none());
}
