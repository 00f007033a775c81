//! Remote implementation of the account repository.

use crate::dto::{AccountPatchRow, AccountRow, NewAccountRow};
use crate::remote::{Query, RemoteStore};
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::account::{Account, AccountPatch, AccountRepository, NewAccount};
use tandem_core::error::{Result, TandemError};
use uuid::Uuid;

const ACCOUNTS_TABLE: &str = "accounts";

/// Accounts collection backed by the remote store.
pub struct RemoteAccountRepository {
    store: Arc<RemoteStore>,
}

impl RemoteAccountRepository {
    pub fn new(store: Arc<RemoteStore>) -> Self {
        Self { store }
    }

    /// Row predicate for "this id, and the acting user is a member".
    fn membership(id: Uuid, member_id: Uuid) -> Query {
        Query::table(ACCOUNTS_TABLE)
            .eq("id", id)
            .either_eq("owner_id", "partner_id", member_id)
    }
}

#[async_trait]
impl AccountRepository for RemoteAccountRepository {
    async fn list(&self, member_id: Uuid) -> Result<Vec<Account>> {
        let rows: Vec<AccountRow> = self
            .store
            .select(
                Query::table(ACCOUNTS_TABLE)
                    .columns("*")
                    .either_eq("owner_id", "partner_id", member_id)
                    .order_desc("created_at"),
            )
            .await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let row: Option<AccountRow> = self
            .store
            .select_first(Query::table(ACCOUNTS_TABLE).columns("*").eq("id", id))
            .await?;
        Ok(row.map(Account::from))
    }

    async fn insert(&self, account: &NewAccount) -> Result<Account> {
        let row: AccountRow = self
            .store
            .insert(ACCOUNTS_TABLE, &NewAccountRow::from(account))
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, member_id: Uuid, patch: &AccountPatch) -> Result<()> {
        let affected = self
            .store
            .update(
                Self::membership(id, member_id),
                &AccountPatchRow::from_patch(patch),
            )
            .await?;
        if affected == 0 {
            return Err(TandemError::unauthorized(format!(
                "account {id} is not editable by this user"
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid, member_id: Uuid) -> Result<()> {
        let affected = self.store.delete(Self::membership(id, member_id)).await?;
        if affected == 0 {
            return Err(TandemError::unauthorized(format!(
                "account {id} is not deletable by this user"
            )));
        }
        Ok(())
    }
}
