use super::Registration;
use crate::error::{ErrorBody, RegistrationError};
use crate::store::RegistrationStore;
use crate::validate::canonical_registration;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use rsvp_derive::{api_handler, api_model};
use rsvp_domain::config::ApiConfig;
use rsvp_domain::constants::REGISTRATION_TAG;
use rsvp_domain::registration::RegistrationRecord;
use rsvp_kernel::server::ApiState;
use tracing::{error, info};

#[api_model]
/// Registration form submission. Digits may still carry display separators.
pub(super) struct RegistrationBody {
    name: String,
    phone_digits: String,
    national_id_digits: String,
}

#[api_model]
/// A stored registration.
pub(super) struct RegistrationResponse {
    id: String,
    name: String,
    phone_digits: String,
    national_id_digits: String,
    created_at: DateTime<Utc>,
}

impl From<RegistrationRecord> for RegistrationResponse {
    fn from(record: RegistrationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            phone_digits: record.phone_digits,
            national_id_digits: record.national_id_digits,
            created_at: record.created_at,
        }
    }
}

#[api_model]
/// Event details for the landing page.
pub(super) struct EventResponse {
    title: String,
    description: String,
    venue: String,
    starts_at: String,
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Persistence { message, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone().into_owned())
            },
            _ => {
                error!(error = %self, "Registration request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned())
            },
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

fn slice(state: &ApiState) -> Result<&Registration, RegistrationError> {
    state.try_get_slice::<Registration>().map_err(|e| RegistrationError::from(e.to_string()))
}

#[api_handler(
    get,
    path = "/api/event",
    responses((status = OK, description = "Event details", body = EventResponse)),
    tag = REGISTRATION_TAG,
)]
pub(super) async fn event_handler(State(config): State<ApiConfig>) -> Json<EventResponse> {
    let event = &config.event;

    Json(EventResponse {
        title: event.title.clone(),
        description: event.description.clone(),
        venue: event.venue.clone(),
        starts_at: event.starts_at.clone(),
    })
}

#[api_handler(
    post,
    path = "/api/registrations",
    request_body = RegistrationBody,
    responses(
        (status = CREATED, description = "Registration stored", body = RegistrationResponse),
        (
            status = UNPROCESSABLE_ENTITY,
            description = "Invalid or rejected registration",
            body = ErrorBody
        ),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = REGISTRATION_TAG,
)]
pub(super) async fn create_registration(
    State(state): State<ApiState>,
    Json(body): Json<RegistrationBody>,
) -> Result<(StatusCode, Json<RegistrationResponse>), RegistrationError> {
    let registration =
        canonical_registration(&body.name, &body.phone_digits, &body.national_id_digits)
            .map_err(|e| RegistrationError::Persistence {
                message: e.to_string().into(),
                context: Some("Payload validation".into()),
            })?;

    let record = slice(&state)?.store.insert(registration).await?;
    info!(id = %record.id, "Registration stored");

    Ok((StatusCode::CREATED, Json(record.into())))
}

#[api_handler(
    get,
    path = "/api/registrations",
    responses(
        (
            status = OK,
            description = "All registrations, newest first",
            body = [RegistrationResponse]
        ),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = REGISTRATION_TAG,
)]
pub(super) async fn list_registrations(
    State(state): State<ApiState>,
) -> Result<Json<Vec<RegistrationResponse>>, RegistrationError> {
    let records = slice(&state)?.store.list_all().await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
