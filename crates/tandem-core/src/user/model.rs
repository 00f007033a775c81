//! User domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity recognized by the remote auth provider.
///
/// Owned by the remote service; this client only ever replaces it
/// wholesale, never mutates its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque identifier assigned by the auth provider
    pub id: Uuid,
    /// Email the principal signed up with
    pub email: String,
}

/// Email/password pair submitted at sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Data submitted at sign-up.
///
/// Name fields are written to the principal's profile record in a second
/// step after the auth account is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub password: String,
}

/// Profile record completing a principal's registration.
///
/// Keyed by the principal id in the remote `profiles` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Builds the profile record for a freshly registered principal.
    pub fn for_registration(principal: &Principal, registration: &Registration) -> Self {
        Self {
            id: principal.id,
            given_name: registration.given_name.clone(),
            family_name: registration.family_name.clone(),
            updated_at: Utc::now(),
        }
    }
}
