//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the slice registry and (with
//! `server`) the Axum application state plus system routes.
//!
//! ## Config loading
//! ```rust,ignore
//! use rsvp_kernel::config::load_config;
//! use rsvp_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server"))?;
//! ```

pub mod config;
pub mod registry;
#[cfg(feature = "server")]
pub mod server;

pub use rsvp_domain as domain;
