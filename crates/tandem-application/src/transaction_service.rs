//! Transaction access service.

use crate::notify::Notifier;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tandem_core::error::{Result, TandemError};
use tandem_core::session::SessionHolder;
use tandem_core::transaction::{
    CategorySummary, NewTransaction, Transaction, TransactionDraft, TransactionFilter,
    TransactionKind, TransactionPatch, TransactionRepository,
};
use tandem_core::user::Principal;
use uuid::Uuid;

/// CRUD and reporting over transactions.
///
/// Mutations are stamped with the signed-in principal and scoped to it
/// remotely; the only client-side check is the non-negative amount
/// invariant, which is a form-level validation.
pub struct TransactionService {
    transactions: Arc<dyn TransactionRepository>,
    session: SessionHolder,
    notifier: Arc<dyn Notifier>,
}

impl TransactionService {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        session: SessionHolder,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            transactions,
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

    fn check_amount(&self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            let err = TandemError::validation("transaction amount must not be negative");
            self.notifier
                .error("Transaction amount must not be negative");
            return Err(err);
        }
        Ok(())
    }

    /// Transactions matching the filter, date descending.
    pub async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        match self.transactions.list(filter).await {
            Ok(transactions) => Ok(transactions),
            Err(err) => {
                self.notifier
                    .error(&format!("Could not load transactions: {err}"));
                Err(err)
            }
        }
    }

    /// A single transaction by id.
    pub async fn get(&self, id: Uuid) -> Result<Transaction> {
        let result = match self.transactions.find_by_id(id).await {
            Ok(Some(transaction)) => return Ok(transaction),
            Ok(None) => Err(TandemError::not_found("transaction", id.to_string())),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            self.notifier
                .error(&format!("Could not load transaction: {err}"));
        }
        result
    }

    /// Records a transaction, stamped with the signed-in principal.
    pub async fn create(&self, draft: &TransactionDraft) -> Result<Transaction> {
        let principal = self.require_principal()?;
        self.check_amount(draft.amount)?;

        let new_transaction = NewTransaction {
            draft: draft.clone(),
            creator_id: principal.id,
        };
        match self.transactions.insert(&new_transaction).await {
            Ok(transaction) => {
                self.notifier.success("Transaction recorded successfully");
                Ok(transaction)
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not record transaction: {err}"));
                Err(err)
            }
        }
    }

    /// Overwrites a transaction's fields, scoped to its creator.
    pub async fn update(&self, id: Uuid, patch: &TransactionPatch) -> Result<()> {
        let principal = self.require_principal()?;
        self.check_amount(patch.amount)?;

        match self.transactions.update(id, principal.id, patch).await {
            Ok(()) => {
                self.notifier.success("Transaction updated successfully");
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not update transaction: {err}"));
                Err(err)
            }
        }
    }

    /// Deletes a transaction, scoped to its creator.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let principal = self.require_principal()?;
        match self.transactions.delete(id, principal.id).await {
            Ok(()) => {
                self.notifier.success("Transaction deleted successfully");
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Could not delete transaction: {err}"));
                Err(err)
            }
        }
    }

    /// Per-category inflow/outflow totals for one account.
    pub async fn summarize_by_category(
        &self,
        account_id: Uuid,
        period: Option<(chrono::NaiveDate, chrono::NaiveDate)>,
    ) -> Result<Vec<CategorySummary>> {
        let mut filter = TransactionFilter::for_account(account_id);
        if let Some((from, to)) = period {
            filter = filter.between(from, to);
        }

        let transactions = match self.transactions.list(&filter).await {
            Ok(transactions) => transactions,
            Err(err) => {
                self.notifier
                    .error(&format!("Could not load category summary: {err}"));
                return Err(err);
            }
        };

        let mut totals: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        for tx in &transactions {
            let entry = totals.entry(tx.category.clone()).or_default();
            match tx.kind {
                TransactionKind::Inflow => entry.0 += tx.amount,
                TransactionKind::Outflow => entry.1 += tx.amount,
            }
        }

        Ok(totals
            .into_iter()
            .map(|(category, (inflow, outflow))| CategorySummary {
                category,
                inflow,
                outflow,
                net: inflow - outflow,
            })
            .collect())
    }
}
