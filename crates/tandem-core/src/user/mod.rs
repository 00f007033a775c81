//! Principal identity and profile types.

pub mod model;
pub mod repository;

pub use model::{Credentials, Principal, Registration, UserProfile};
pub use repository::{IdentityDirectory, ProfileRepository};
