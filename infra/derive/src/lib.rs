#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the RSVP workspace: error enums with attachable
//! context, API data models, `OpenAPI`-aware handlers and feature slices.
//!
//! The examples below are `ignore`d because they only compile inside crates that
//! depend on `thiserror`, `serde`, `utoipa` or `rsvp-kernel`.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a request/response model with the workspace serde policy.
///
/// * Derives `Debug`, `Serialize` and `Deserialize` unless already present.
/// * Derives `utoipa::ToSchema` when the consuming crate enables `server`.
/// * Applies `rename_all = "camelCase"` and `deny_unknown_fields` by default.
///
/// # Arguments
///
/// * `rename_all = "snake_case"` - overrides the rename policy.
/// * `deny_unknown_fields = false` - accepts unknown fields.
///
/// # Example
///
/// ```rust,ignore
/// #[rsvp_derive::api_model]
/// pub struct RegistrationBody {
///     pub name: String,
///     pub phone_digits: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` when the `server` feature is enabled.
///
/// Accepts the usual `utoipa::path` arguments (`get`, `post`, `path = "..."`,
/// `responses(...)`, `tag = "..."`).
///
/// # Example
///
/// ```rust,ignore
/// #[rsvp_derive::api_handler(get, path = "/health", responses((status = OK)), tag = "System")]
/// pub async fn health() -> &'static str {
///     "up"
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum into the workspace error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait with `.context(...)` for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant that wraps a `source`.
/// * `From<Source>` for those variants, so `?` works on upstream errors.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants must have named fields. A variant with a `source` must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[rsvp_derive::rsvp_error]
/// pub enum StoreError {
///     #[error("Store I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<String, StoreError> {
///     std::fs::read_to_string("store.json").context("Reading store snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn rsvp_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Declares a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is an `Arc` wrapper that
/// derefs to it and implements `rsvp_kernel::registry::FeatureSlice`.
///
/// # Example
///
/// ```rust,ignore
/// #[rsvp_derive::rsvp_slice]
/// pub struct Registration {
///     pub store: SurrealStore,
/// }
///
/// let slice = Registration::new(RegistrationInner { store });
/// ```
#[proc_macro_attribute]
pub fn rsvp_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
