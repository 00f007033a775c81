//! Wire-row DTOs for the remote collections.
//!
//! Row structs mirror the remote column layout; domain types never leak
//! column-level concerns (patch timestamp stamping, nullable partner
//! clearing) and rows never leak into the application layer.

pub mod account;
pub mod transaction;
pub mod user;

pub use account::{AccountPatchRow, AccountRow, NewAccountRow};
pub use transaction::{NewTransactionRow, TransactionPatchRow, TransactionRow};
pub use user::ProfileRow;
