//! Transaction rows.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tandem_core::transaction::{NewTransaction, Transaction, TransactionKind, TransactionPatch};
use uuid::Uuid;

/// Row of the `transactions` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub creator_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            account_id: row.account_id,
            creator_id: row.creator_id,
            description: row.description,
            amount: row.amount,
            date: row.date,
            kind: row.kind,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert payload; ids and timestamps are assigned remotely.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransactionRow<'a> {
    pub account_id: Uuid,
    pub creator_id: Uuid,
    pub description: &'a str,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: &'a str,
}

impl<'a> From<&'a NewTransaction> for NewTransactionRow<'a> {
    fn from(transaction: &'a NewTransaction) -> Self {
        let draft = &transaction.draft;
        Self {
            account_id: draft.account_id,
            creator_id: transaction.creator_id,
            description: &draft.description,
            amount: draft.amount,
            date: draft.date,
            kind: draft.kind,
            category: &draft.category,
        }
    }
}

/// Update payload, stamped with the patch time.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPatchRow<'a> {
    pub account_id: Uuid,
    pub description: &'a str,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> TransactionPatchRow<'a> {
    pub fn from_patch(patch: &'a TransactionPatch) -> Self {
        Self {
            account_id: patch.account_id,
            description: &patch.description,
            amount: patch.amount,
            date: patch.date,
            kind: patch.kind,
            category: &patch.category,
            updated_at: Utc::now(),
        }
    }
}
