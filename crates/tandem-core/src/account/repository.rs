//! Account repository trait.

use super::model::{Account, AccountPatch, NewAccount};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// An abstract repository for the shared accounts collection.
///
/// Mutations are scoped to rows where `member_id` is the owner or the
/// partner; the scoping predicate travels with the remote query, it is
/// never re-checked client-side. A mutation that matches no row fails
/// with an authorization error.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Lists the accounts the principal is a member of, newest first.
    async fn list(&self, member_id: Uuid) -> Result<Vec<Account>>;

    /// Finds an account by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Account))`: account found
    /// - `Ok(None)`: no such account visible to the caller
    /// - `Err(_)`: error occurred during retrieval
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Inserts a new account and returns the created row.
    async fn insert(&self, account: &NewAccount) -> Result<Account>;

    /// Overwrites an account's mutable fields, scoped to membership.
    async fn update(&self, id: Uuid, member_id: Uuid, patch: &AccountPatch) -> Result<()>;

    /// Deletes an account, scoped to membership. No soft-delete.
    async fn delete(&self, id: Uuid, member_id: Uuid) -> Result<()>;
}
