//! Transaction repository trait.

use super::model::{NewTransaction, Transaction, TransactionFilter, TransactionPatch};
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// An abstract repository for the transactions collection.
///
/// Listings are ordered by transaction date descending (creation
/// timestamp descending for equal dates). Mutations are scoped to rows
/// whose creator matches `creator_id`; a mutation matching no row fails
/// with an authorization error.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Lists transactions matching the filter, date descending.
    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    /// Finds a transaction by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>>;

    /// Inserts a new transaction and returns the created row.
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction>;

    /// Overwrites a transaction's mutable fields, scoped to its creator.
    async fn update(&self, id: Uuid, creator_id: Uuid, patch: &TransactionPatch) -> Result<()>;

    /// Deletes a transaction, scoped to its creator.
    async fn delete(&self, id: Uuid, creator_id: Uuid) -> Result<()>;
}
