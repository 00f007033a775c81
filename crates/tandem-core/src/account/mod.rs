//! Shared account domain.

pub mod model;
pub mod repository;

pub use model::{Account, AccountCreated, AccountDraft, AccountPatch, InviteOutcome, NewAccount};
pub use repository::AccountRepository;
