//! Remote store client.

pub mod client;
pub mod query;

pub use client::RemoteStore;
pub use query::Query;
