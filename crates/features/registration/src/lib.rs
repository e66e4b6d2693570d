//! # Registration
//!
//! The event-invitation registration slice.
//!
//! * [`mask`] turns raw keystrokes into display values for phone numbers and
//!   national IDs, and back into canonical digits.
//! * [`controller`] drives one form session through
//!   `editing -> submitting -> success`, returning to editing on failure.
//! * [`store`] is the persistence seam; [`listing`] shapes stored records for display.
//! * `server` feature: `SurrealDB` store, HTTP handlers and the slice initializer.
//! * `client` feature: `HttpStore`, the same store reached over HTTP.
//!
//! ```rust,ignore
//! use rsvp_registration::controller::{Field, SubmissionController, SubmitOutcome};
//!
//! let form = SubmissionController::new(store);
//! form.update_field(Field::Name, "Ana Souza");
//! form.update_field(Field::Phone, "11987654321");
//! form.update_field(Field::NationalId, "12345678901");
//!
//! if let SubmitOutcome::Confirmed(record) = form.submit().await {
//!     println!("Confirmed {}", record.name);
//! }
//! ```

#[cfg(feature = "client")]
mod client;
pub mod controller;
mod error;
pub mod listing;
pub mod mask;
#[cfg(feature = "server")]
pub mod server;
pub mod store;
mod validate;

#[cfg(feature = "client")]
pub use client::HttpStore;
pub use error::{
    ErrorBody, RegistrationError, RegistrationErrorExt, UNKNOWN_ERROR_MESSAGE, ValidationError,
};
#[cfg(feature = "server")]
pub use server::{Registration, SurrealStore, init};
pub use validate::canonical_registration;
