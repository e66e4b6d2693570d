use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insert payload sent to the persistence collaborator.
///
/// Digit fields hold canonical values (digits only, no display separators).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub phone_digits: String,
    pub national_id_digits: String,
}

/// A confirmed attendee as stored remotely. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub id: String,
    pub name: String,
    pub phone_digits: String,
    pub national_id_digits: String,
    pub created_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Builds a record for a payload that was just persisted.
    #[must_use]
    pub fn from_new(
        id: impl Into<String>,
        new: NewRegistration,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            phone_digits: new.phone_digits,
            national_id_digits: new.national_id_digits,
            created_at,
        }
    }
}

/// Orders records the way the attendee list shows them: newest first.
pub fn sort_newest_first(records: &mut [RegistrationRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
