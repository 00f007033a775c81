//! Profile rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tandem_core::user::UserProfile;
use uuid::Uuid;

/// Row of the `profiles` collection, keyed by principal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            given_name: row.given_name,
            family_name: row.family_name,
            updated_at: row.updated_at,
        }
    }
}

impl From<&UserProfile> for ProfileRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            given_name: profile.given_name.clone(),
            family_name: profile.family_name.clone(),
            updated_at: profile.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trip() {
        let profile = UserProfile {
            id: Uuid::new_v4(),
            given_name: "Ana".to_string(),
            family_name: "Souza".to_string(),
            updated_at: Utc::now(),
        };
        let row = ProfileRow::from(&profile);
        assert_eq!(UserProfile::from(row), profile);
    }
}
