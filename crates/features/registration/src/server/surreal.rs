use crate::error::{RegistrationError, RegistrationErrorExt};
use crate::store::RegistrationStore;
use chrono::{DateTime, Utc};
use rsvp_database::Database;
use rsvp_domain::constants::REGISTRATION_TABLE;
use rsvp_domain::registration::{NewRegistration, RegistrationRecord, sort_newest_first};
use surrealdb::types::SurrealValue;
use tracing::instrument;

const RECORD_PROJECTION: &str = "<string> id AS id, name, phone_digits, national_id_digits, \
     <string> created_at AS created_at";

/// [`RegistrationStore`] backed by the `registration` table.
#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Database,
}

impl SurrealStore {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[derive(Debug, SurrealValue)]
struct RegistrationRow {
    id: String,
    name: String,
    phone_digits: String,
    national_id_digits: String,
    created_at: String,
}

impl TryFrom<RegistrationRow> for RegistrationRecord {
    type Error = RegistrationError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| RegistrationError::Internal {
                message: format!("Invalid created_at '{}': {e}", row.created_at).into(),
                context: Some(row.id.clone().into()),
            })?
            .with_timezone(&Utc);

        Ok(Self {
            id: row.id,
            name: row.name,
            phone_digits: row.phone_digits,
            national_id_digits: row.national_id_digits,
            created_at,
        })
    }
}

impl RegistrationStore for SurrealStore {
    #[instrument(skip_all)]
    async fn insert(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, RegistrationError> {
        let query = format!(
            "LET $created = CREATE ONLY {REGISTRATION_TABLE} CONTENT {{
                name: $name,
                phone_digits: $phone_digits,
                national_id_digits: $national_id_digits,
            }};
            SELECT {RECORD_PROJECTION} FROM ONLY $created.id;"
        );

        let mut response = self
            .db
            .query(query)
            .bind(("name", registration.name))
            .bind(("phone_digits", registration.phone_digits))
            .bind(("national_id_digits", registration.national_id_digits))
            .await
            .context("Creating registration")?
            .check()
            .map_err(|e| RegistrationError::Persistence {
                message: e.to_string().into(),
                context: Some("Registration rejected by the store".into()),
            })?;

        let row = response.take::<Option<RegistrationRow>>(1).context("Reading new registration")?;
        let row = row.ok_or(RegistrationError::Internal {
            message: "Created registration could not be read back".into(),
            context: None,
        })?;

        row.try_into()
    }

    #[instrument(skip_all)]
    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        let rows = self
            .db
            .query(format!(
                "SELECT {RECORD_PROJECTION} FROM {REGISTRATION_TABLE} ORDER BY created_at DESC"
            ))
            .await
            .context("Listing registrations")?
            .take::<Vec<RegistrationRow>>(0)
            .context("Reading registrations")?;

        let mut records =
            rows.into_iter().map(RegistrationRecord::try_from).collect::<Result<Vec<_>, _>>()?;
        sort_newest_first(&mut records);

        Ok(records)
    }
}
