//! Remote implementation of the transaction repository.

use crate::dto::{NewTransactionRow, TransactionPatchRow, TransactionRow};
use crate::remote::{Query, RemoteStore};
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::error::{Result, TandemError};
use tandem_core::transaction::{
    NewTransaction, Transaction, TransactionFilter, TransactionPatch, TransactionRepository,
};
use uuid::Uuid;

const TRANSACTIONS_TABLE: &str = "transactions";

/// Transactions collection backed by the remote store.
pub struct RemoteTransactionRepository {
    store: Arc<RemoteStore>,
}

impl RemoteTransactionRepository {
    pub fn new(store: Arc<RemoteStore>) -> Self {
        Self { store }
    }

    /// Row predicate for "this id, created by this user".
    fn ownership(id: Uuid, creator_id: Uuid) -> Query {
        Query::table(TRANSACTIONS_TABLE)
            .eq("id", id)
            .eq("creator_id", creator_id)
    }

    fn listing(filter: &TransactionFilter) -> Query {
        let mut query = Query::table(TRANSACTIONS_TABLE).columns("*");
        if let Some(account_id) = filter.account_id {
            query = query.eq("account_id", account_id);
        }
        if let Some(category) = &filter.category {
            query = query.eq("category", category);
        }
        if let Some(kind) = filter.kind {
            query = query.eq("kind", kind);
        }
        if let Some(from) = filter.from {
            query = query.gte("date", from);
        }
        if let Some(to) = filter.to {
            query = query.lte("date", to);
        }
        // Creation time breaks ties between equal dates.
        query.order_desc("date").order_desc("created_at")
    }
}

#[async_trait]
impl TransactionRepository for RemoteTransactionRepository {
    async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let rows: Vec<TransactionRow> = self.store.select(Self::listing(filter)).await?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>> {
        let row: Option<TransactionRow> = self
            .store
            .select_first(Query::table(TRANSACTIONS_TABLE).columns("*").eq("id", id))
            .await?;
        Ok(row.map(Transaction::from))
    }

    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction> {
        let row: TransactionRow = self
            .store
            .insert(TRANSACTIONS_TABLE, &NewTransactionRow::from(transaction))
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, creator_id: Uuid, patch: &TransactionPatch) -> Result<()> {
        let affected = self
            .store
            .update(
                Self::ownership(id, creator_id),
                &TransactionPatchRow::from_patch(patch),
            )
            .await?;
        if affected == 0 {
            return Err(TandemError::unauthorized(format!(
                "transaction {id} is not editable by this user"
            )));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid, creator_id: Uuid) -> Result<()> {
        let affected = self.store.delete(Self::ownership(id, creator_id)).await?;
        if affected == 0 {
            return Err(TandemError::unauthorized(format!(
                "transaction {id} is not deletable by this user"
            )));
        }
        Ok(())
    }
}
