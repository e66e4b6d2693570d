//! # Domain Models
//!
//! Pure types shared by the registration core, the server and the shell.
//! Keep it lean: no I/O, networking, or heavy logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod event;
pub mod registration;
