use crate::mask::{NATIONAL_ID_DIGITS, PHONE_MIN_DIGITS};
use std::borrow::Cow;

/// Shown when a failure carries nothing worth telling the attendee.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Registration slice error type.
#[rsvp_derive::rsvp_error]
pub enum RegistrationError {
    /// The store refused or failed the operation; the message is user-facing.
    #[error("Persistence error{}: {message}", format_context(.context))]
    Persistence { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    #[cfg(feature = "client")]
    #[error("Transport error{}: {source}", format_context(.context))]
    Transport {
        #[source]
        source: reqwest::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl RegistrationError {
    /// The message the form shows after a failed submission. Never empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Persistence { message, .. } if !message.trim().is_empty() => {
                format!("Database error: {message}")
            },
            #[cfg(feature = "client")]
            Self::Transport { .. } => {
                "Could not reach the registration service. Please try again.".to_owned()
            },
            _ => UNKNOWN_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// JSON body of every failed API response.
#[rsvp_derive::api_model]
pub struct ErrorBody {
    pub message: String,
}

/// Local validation failures. These never reach the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Phone number needs at least {min} digits (got {digits})", min = PHONE_MIN_DIGITS)]
    PhoneTooShort { digits: usize },
    #[error("National ID needs {len} digits (got {digits})", len = NATIONAL_ID_DIGITS)]
    NationalIdIncomplete { digits: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_message_is_surfaced() {
        let err = RegistrationError::Persistence {
            message: "duplicate national id".into(),
            context: None,
        };
        assert_eq!(err.user_message(), "Database error: duplicate national id");
    }

    #[test]
    fn blank_or_internal_failures_fall_back() {
        let blank = RegistrationError::Persistence { message: "  ".into(), context: None };
        assert_eq!(blank.user_message(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(RegistrationError::from("boom").user_message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn validation_messages_name_the_limits() {
        assert_eq!(
            ValidationError::PhoneTooShort { digits: 9 }.to_string(),
            "Phone number needs at least 10 digits (got 9)"
        );
        assert_eq!(
            ValidationError::NationalIdIncomplete { digits: 3 }.to_string(),
            "National ID needs 11 digits (got 3)"
        );
    }
}
