//! Names shared between the store, the HTTP API and the `OpenAPI` docs.

/// `SurrealDB` table holding confirmed attendees.
pub const REGISTRATION_TABLE: &str = "registration";

/// `OpenAPI` tag for system endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for event and registration endpoints.
pub const REGISTRATION_TAG: &str = "Registration";

/// Collection path for registrations.
pub const REGISTRATIONS_PATH: &str = "/api/registrations";
/// Event details path.
pub const EVENT_PATH: &str = "/api/event";

