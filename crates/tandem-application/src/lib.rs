//! Application services for the Tandem client.
//!
//! The orchestration layer between a view shell and the remote store:
//! the auth orchestrator, the per-resource access services, and the
//! notification sink they report through. Services hold their
//! collaborators as `Arc<dyn Trait>` so shells wire them against the
//! remote implementations and tests wire them against in-memory fakes.

pub mod account_service;
pub mod auth_service;
pub mod bootstrap;
pub mod category_service;
pub mod notify;
pub mod transaction_service;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use bootstrap::Services;
pub use category_service::CategoryService;
pub use notify::{Notifier, TracingNotifier};
pub use transaction_service::TransactionService;
