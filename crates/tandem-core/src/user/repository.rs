//! Profile and identity lookup traits.

use super::model::UserProfile;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// An abstract repository for principal profile records.
///
/// Decouples the sign-up orchestration from the remote collection that
/// stores completion data (name fields keyed by principal id).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Creates or overwrites the profile record for a principal.
    async fn upsert(&self, profile: &UserProfile) -> Result<()>;

    /// Finds a profile by its principal id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserProfile))`: profile found
    /// - `Ok(None)`: no profile recorded for this principal
    /// - `Err(_)`: error occurred during retrieval
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>>;
}

/// Email-to-principal lookup against the remote identity collection.
///
/// Used by the partner-invite resolution when creating or updating a
/// shared account.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolves an email to a principal id.
    ///
    /// An unmatched email is not an error; it resolves to `Ok(None)`.
    async fn find_user_id(&self, email: &str) -> Result<Option<Uuid>>;
}
