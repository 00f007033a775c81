//! Remote implementations of the profile and identity lookups.

use crate::dto::ProfileRow;
use crate::remote::{Query, RemoteStore};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tandem_core::error::Result;
use tandem_core::user::{IdentityDirectory, ProfileRepository, UserProfile};
use uuid::Uuid;

const PROFILES_TABLE: &str = "profiles";
const IDENTITIES_TABLE: &str = "user_identities";

/// Profiles collection backed by the remote store.
pub struct RemoteProfileRepository {
    store: Arc<RemoteStore>,
}

impl RemoteProfileRepository {
    pub fn new(store: Arc<RemoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for RemoteProfileRepository {
    async fn upsert(&self, profile: &UserProfile) -> Result<()> {
        self.store
            .upsert(PROFILES_TABLE, &ProfileRow::from(profile))
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>> {
        let row: Option<ProfileRow> = self
            .store
            .select_first(Query::table(PROFILES_TABLE).columns("*").eq("id", id))
            .await?;
        Ok(row.map(UserProfile::from))
    }
}

#[derive(Deserialize)]
struct IdentityRow {
    id: Uuid,
}

/// Email-to-principal lookup against the identity collection.
///
/// An unmatched email resolves to `Ok(None)`; the partner-invite flow
/// depends on that being a non-error.
pub struct RemoteIdentityDirectory {
    store: Arc<RemoteStore>,
}

impl RemoteIdentityDirectory {
    pub fn new(store: Arc<RemoteStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityDirectory for RemoteIdentityDirectory {
    async fn find_user_id(&self, email: &str) -> Result<Option<Uuid>> {
        let row: Option<IdentityRow> = self
            .store
            .select_first(
                Query::table(IDENTITIES_TABLE)
                    .columns("id")
                    .eq("email", email),
            )
            .await?;
        Ok(row.map(|r| r.id))
    }
}
