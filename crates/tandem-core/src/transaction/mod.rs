//! Transaction domain.

pub mod model;
pub mod repository;

pub use model::{
    CategorySummary, NewTransaction, Transaction, TransactionDraft, TransactionFilter,
    TransactionKind, TransactionPatch,
};
pub use repository::TransactionRepository;
