//! HTTP client for the registration API.

use crate::error::{ErrorBody, RegistrationError, RegistrationErrorExt};
use crate::store::RegistrationStore;
use reqwest::{Client, Response};
use rsvp_domain::constants::{EVENT_PATH, REGISTRATIONS_PATH};
use rsvp_domain::event::EventDetails;
use rsvp_domain::registration::{NewRegistration, RegistrationRecord};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// [`RegistrationStore`] that talks to a running RSVP server.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:4583`).
    ///
    /// # Errors
    /// Returns [`RegistrationError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, RegistrationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Building HTTP client")?;

        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches the event shown on the landing page.
    ///
    /// # Errors
    /// Transport failures and non-success responses.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn event(&self) -> Result<EventDetails, RegistrationError> {
        let response =
            self.client.get(self.url(EVENT_PATH)).send().await.context("Fetching event")?;
        decode(response).await
    }
}

impl RegistrationStore for HttpStore {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn insert(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, RegistrationError> {
        let response = self
            .client
            .post(self.url(REGISTRATIONS_PATH))
            .json(&registration)
            .send()
            .await
            .context("Sending registration")?;
        decode(response).await
    }

    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        let response = self
            .client
            .get(self.url(REGISTRATIONS_PATH))
            .send()
            .await
            .context("Listing registrations")?;
        decode(response).await
    }
}

/// Decodes a success body, or turns an error body into [`RegistrationError::Persistence`]
/// carrying the server's message.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RegistrationError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.context("Decoding response body");
    }

    debug!(%status, "Server rejected request");
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.to_string(),
    };

    Err(RegistrationError::Persistence {
        message: message.into(),
        context: Some(format!("HTTP {}", status.as_u16()).into()),
    })
}
