//! The persistence collaborator seen by the submission controller.

use crate::error::RegistrationError;
use rsvp_domain::registration::{NewRegistration, RegistrationRecord};
use std::fmt::Debug;
use std::future::Future;

/// Remote store for confirmed registrations.
///
/// Implementations: `SurrealStore` (`server` feature) and `HttpStore` (`client` feature).
pub trait RegistrationStore: Debug + Send + Sync + 'static {
    /// Persists one registration and returns the stored record.
    fn insert(
        &self,
        registration: NewRegistration,
    ) -> impl Future<Output = Result<RegistrationRecord, RegistrationError>> + Send;

    /// Every stored registration, newest first.
    fn list_all(
        &self,
    ) -> impl Future<Output = Result<Vec<RegistrationRecord>, RegistrationError>> + Send;
}
