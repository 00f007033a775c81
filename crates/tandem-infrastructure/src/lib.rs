//! Remote-store implementations of the Tandem core traits.
//!
//! This crate owns every network concern: the reqwest client against the
//! hosted service's auth and table endpoints, the wire-row DTOs, and the
//! repository implementations the application layer is wired with.

pub mod account_repository;
pub mod auth_backend;
pub mod category_repository;
pub mod config_storage;
pub mod dto;
pub mod profile_repository;
pub mod remote;
pub mod transaction_repository;

pub use account_repository::RemoteAccountRepository;
pub use category_repository::RemoteCategoryRepository;
pub use config_storage::ConfigStorage;
pub use profile_repository::{RemoteIdentityDirectory, RemoteProfileRepository};
pub use remote::RemoteStore;
pub use transaction_repository::RemoteTransactionRepository;
