//! Facade crate for the RSVP workspace.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `rsvp` with the desired feature flags (`server`/`client`).
//! - Call `rsvp::init` (server) to register feature slices and
//!   `rsvp::server::router::api_router` for their routes.

pub use rsvp_domain as domain;
pub use rsvp_kernel as kernel;

#[cfg(feature = "server")]
use rsvp_database::Database;
#[cfg(feature = "server")]
use rsvp_kernel::registry::InitializedSlice;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use rsvp_kernel::server::ApiState;
        pub use rsvp_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes plus the routes of every enabled slice.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router().merge(crate::features::registration::server::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use rsvp_registration as registration;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "registration",
        #[cfg(feature = "server")]
        "server",
        #[cfg(feature = "client")]
        "client",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(database: &Database) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Registration
    slices.push(features::registration::init(database)?);

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::features;

    #[test]
    fn registration_is_always_enabled() {
        assert!(features::is_enabled("registration"));
        assert!(!features::is_enabled("licensing"));
    }
}
