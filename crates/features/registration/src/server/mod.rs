//! Server side of the slice: `SurrealDB` persistence and the HTTP endpoints.

mod handlers;
mod surreal;

use crate::error::RegistrationError;
use rsvp_database::Database;
use rsvp_kernel::registry::InitializedSlice;
use rsvp_kernel::server::ApiState;
pub use surreal::SurrealStore;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Registration feature state.
#[rsvp_derive::rsvp_slice]
pub struct Registration {
    pub store: SurrealStore,
}

/// Initialize the registration feature.
///
/// # Errors
/// Currently infallible; the signature matches the other slice initializers.
pub fn init(db: &Database) -> Result<InitializedSlice, RegistrationError> {
    tracing::info!(namespace = db.namespace(), "Registration slice initialized");

    let slice = Registration::new(RegistrationInner { store: SurrealStore::new(db.clone()) });
    Ok(InitializedSlice::new(slice))
}

/// Event and registration endpoints.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::event_handler))
        .routes(routes!(handlers::list_registrations, handlers::create_registration))
}
