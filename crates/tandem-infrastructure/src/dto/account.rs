//! Account rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tandem_core::account::{Account, AccountPatch, NewAccount};
use uuid::Uuid;

/// Row of the `accounts` collection.
///
/// `current_balance` is maintained remotely from the opening balance and
/// the account's transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub opening_balance: Decimal,
    pub current_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_id: Uuid,
    pub partner_id: Option<Uuid>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            opening_balance: row.opening_balance,
            current_balance: row.current_balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
            owner_id: row.owner_id,
            partner_id: row.partner_id,
        }
    }
}

/// Insert payload; ids and timestamps are assigned remotely.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccountRow<'a> {
    pub name: &'a str,
    pub opening_balance: Decimal,
    pub owner_id: Uuid,
    pub partner_id: Option<Uuid>,
}

impl<'a> From<&'a NewAccount> for NewAccountRow<'a> {
    fn from(account: &'a NewAccount) -> Self {
        Self {
            name: &account.name,
            opening_balance: account.opening_balance,
            owner_id: account.owner_id,
            partner_id: account.partner_id,
        }
    }
}

/// Update payload.
///
/// `partner_id` intentionally serializes as `null` when absent so an
/// update can clear a previous partner assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AccountPatchRow<'a> {
    pub name: &'a str,
    pub opening_balance: Decimal,
    pub partner_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> AccountPatchRow<'a> {
    /// Stamps the patch with the current time.
    pub fn from_patch(patch: &'a AccountPatch) -> Self {
        Self {
            name: &patch.name,
            opening_balance: patch.opening_balance,
            partner_id: patch.partner_id,
            updated_at: Utc::now(),
        }
    }
}
