//! Transaction domain model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a transaction.
///
/// The amount field is always non-negative; direction is carried by this
/// tag, never by a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Inflow,
    Outflow,
}

impl TransactionKind {
    /// The signed contribution of `amount` to a balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Inflow => amount,
            Self::Outflow => -amount,
        }
    }

    /// The wire tag, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A financial transaction belonging to exactly one account.
///
/// Mutable only by its creating principal; ownership is enforced by the
/// remote store, not re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    /// The principal who recorded the transaction
    pub creator_id: Uuid,
    pub description: String,
    /// Always non-negative; see [`TransactionKind`]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied data for recording a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub account_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
}

/// Insert payload: a draft stamped with its creator.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub draft: TransactionDraft,
    pub creator_id: Uuid,
}

/// Full overwrite of a transaction's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub account_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
}

/// Equality and range predicates for transaction listings.
///
/// All fields are optional; an empty filter lists every transaction
/// visible to the caller, ordered by date descending.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub account_id: Option<Uuid>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn for_account(account_id: Uuid) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Whether a transaction satisfies every set predicate.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.account_id.is_some_and(|id| tx.account_id != id) {
            return false;
        }
        if self.category.as_deref().is_some_and(|c| tx.category != c) {
            return false;
        }
        if self.kind.is_some_and(|k| tx.kind != k) {
            return false;
        }
        if self.from.is_some_and(|from| tx.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| tx.date > to) {
            return false;
        }
        true
    }
}

/// Per-category inflow/outflow totals over one account's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub inflow: Decimal,
    pub outflow: Decimal,
    /// `inflow - outflow`
    pub net: Decimal,
}
