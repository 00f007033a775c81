//! Account domain model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared account owned by one or two principals.
///
/// `current_balance` is derived remotely as the opening balance plus the
/// signed sum of the account's transactions; this client treats it as
/// read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub opening_balance: Decimal,
    pub current_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The principal who created the account
    pub owner_id: Uuid,
    /// The invited co-owner, when the invite email resolved
    pub partner_id: Option<Uuid>,
}

impl Account {
    /// Whether the given principal may read or mutate this account.
    pub fn is_member(&self, principal_id: Uuid) -> bool {
        self.owner_id == principal_id || self.partner_id == Some(principal_id)
    }
}

/// User-supplied data for creating or updating an account.
///
/// The optional partner email is resolved to a principal id through the
/// identity directory before the row is written; an unmatched email is
/// dropped without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    pub name: String,
    pub opening_balance: Decimal,
    pub partner_email: Option<String>,
}

/// Fully resolved insert payload for the accounts collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub opening_balance: Decimal,
    pub owner_id: Uuid,
    pub partner_id: Option<Uuid>,
}

/// Fully resolved update payload.
///
/// Updates overwrite name, opening balance and partner assignment in one
/// write, matching the account form's submit semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountPatch {
    pub name: String,
    pub opening_balance: Decimal,
    pub partner_id: Option<Uuid>,
}

/// How the partner-email invite on an account write was resolved.
///
/// An unmatched email does not fail the operation; it is reported here so
/// callers can surface "created, invite unresolved" instead of an
/// indistinguishable success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteOutcome {
    /// No partner email was supplied
    NotRequested,
    /// The email matched an identity and the partner was attached
    Resolved,
    /// The email matched nothing; the account has no partner
    Unresolved,
}

/// Result of an account creation, carrying the invite resolution.
#[derive(Debug, Clone)]
pub struct AccountCreated {
    pub account: Account,
    pub invite: InviteOutcome,
}
