//! Form session state machine.
//!
//! A session starts in [`SubmissionState::Editing`], moves to
//! [`SubmissionState::Submitting`] while the single insert is in flight, and
//! ends in [`SubmissionState::Success`]. A failed insert returns it to editing
//! with a message and the typed values intact.

use crate::error::{UNKNOWN_ERROR_MESSAGE, ValidationError};
use crate::mask::{Mask, unformat};
use crate::store::RegistrationStore;
use crate::validate::canonical_registration;
use parking_lot::Mutex;
use rsvp_domain::registration::{NewRegistration, RegistrationRecord};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    NationalId,
}

/// Values typed so far. Masked fields always hold the mask output for their digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    name: String,
    phone_display: String,
    national_id_display: String,
}

impl RegistrationDraft {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phone_display(&self) -> &str {
        &self.phone_display
    }

    #[must_use]
    pub fn national_id_display(&self) -> &str {
        &self.national_id_display
    }

    #[must_use]
    pub fn phone_digits(&self) -> String {
        unformat(&self.phone_display)
    }

    #[must_use]
    pub fn national_id_digits(&self) -> String {
        unformat(&self.national_id_display)
    }

    fn set(&mut self, field: Field, raw: &str) {
        match field {
            Field::Name => raw.clone_into(&mut self.name),
            Field::Phone => self.phone_display = Mask::Phone.apply(raw),
            Field::NationalId => self.national_id_display = Mask::NationalId.apply(raw),
        }
    }

    /// Builds the insert payload.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] the draft violates.
    pub fn validate(&self) -> Result<NewRegistration, ValidationError> {
        canonical_registration(&self.name, &self.phone_display, &self.national_id_display)
    }
}

/// Lifecycle of one form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Accepting edits. Carries the message of the last failed submit, if any.
    Editing { error: Option<String> },
    /// The insert is in flight.
    Submitting,
    /// Terminal. The draft has been discarded.
    Success,
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Editing { error: None }
    }
}

/// What a call to [`SubmissionController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store accepted the registration.
    Confirmed(RegistrationRecord),
    /// Rejected locally; the store was not called.
    Invalid(ValidationError),
    /// The store call failed; the session is editable again.
    Failed { message: String },
    /// Another submit is in flight; nothing happened.
    Busy,
    /// The session already succeeded; nothing happened.
    Closed,
}

#[derive(Debug, Default)]
struct Session {
    draft: RegistrationDraft,
    state: SubmissionState,
}

/// Cloneable handle to a single form session.
///
/// Clones share the same draft and state, so two callers racing on
/// [`submit`](Self::submit) result in exactly one insert.
#[derive(Debug)]
pub struct SubmissionController<S> {
    session: Arc<Mutex<Session>>,
    store: Arc<S>,
}

impl<S> Clone for SubmissionController<S> {
    fn clone(&self) -> Self {
        Self { session: Arc::clone(&self.session), store: Arc::clone(&self.store) }
    }
}

impl<S: RegistrationStore> SubmissionController<S> {
    /// Opens an empty session backed by `store`.
    pub fn new(store: S) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    /// Opens an empty session on a store shared with other sessions.
    pub fn with_shared_store(store: Arc<S>) -> Self {
        Self { session: Arc::default(), store }
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.session.lock().state.clone()
    }

    #[must_use]
    pub fn draft(&self) -> RegistrationDraft {
        self.session.lock().draft.clone()
    }

    /// Message of the last failed submit while still editing.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match &self.session.lock().state {
            SubmissionState::Editing { error } => error.clone(),
            _ => None,
        }
    }

    /// Applies a keystroke to `field` and returns the updated draft.
    ///
    /// Masked fields are normalized and formatted; the name is taken verbatim.
    /// Any pending error is cleared. Returns `None` without touching anything
    /// when the session is not editing.
    pub fn update_field(&self, field: Field, raw: &str) -> Option<RegistrationDraft> {
        let mut session = self.session.lock();
        let SubmissionState::Editing { error } = &mut session.state else {
            debug!(?field, "Edit ignored outside of editing");
            return None;
        };

        *error = None;
        session.draft.set(field, raw);
        Some(session.draft.clone())
    }

    /// Validates the draft and, if it passes, performs exactly one insert.
    ///
    /// Never leaves the session in [`SubmissionState::Submitting`].
    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut session = self.session.lock();
            match session.state {
                SubmissionState::Submitting => return SubmitOutcome::Busy,
                SubmissionState::Success => return SubmitOutcome::Closed,
                SubmissionState::Editing { .. } => {},
            }

            match session.draft.validate() {
                Ok(payload) => {
                    session.state = SubmissionState::Submitting;
                    payload
                },
                Err(err) => {
                    debug!(%err, "Registration rejected locally");
                    session.state = SubmissionState::Editing { error: Some(err.to_string()) };
                    return SubmitOutcome::Invalid(err);
                },
            }
        };

        let mut in_flight = InFlight { session: &self.session, settled: false };
        info!("Submitting registration");
        let result = self.store.insert(payload).await;

        let mut session = self.session.lock();
        in_flight.settled = true;
        match result {
            Ok(record) => {
                info!(id = %record.id, "Registration confirmed");
                session.state = SubmissionState::Success;
                session.draft = RegistrationDraft::default();
                SubmitOutcome::Confirmed(record)
            },
            Err(err) => {
                warn!(%err, "Registration insert failed");
                let message = err.user_message();
                session.state = SubmissionState::Editing { error: Some(message.clone()) };
                SubmitOutcome::Failed { message }
            },
        }
    }
}

/// Returns an abandoned submit to editing: the submit future was dropped
/// mid-insert or the store panicked.
struct InFlight<'a> {
    session: &'a Mutex<Session>,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut session = self.session.lock();
        if session.state == SubmissionState::Submitting {
            warn!("Submit abandoned before the store answered");
            session.state =
                SubmissionState::Editing { error: Some(UNKNOWN_ERROR_MESSAGE.to_owned()) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_masks_digit_fields() {
        let mut draft = RegistrationDraft::default();
        draft.set(Field::Phone, "11a98765-43210");
        draft.set(Field::NationalId, "123 456 789 01");
        draft.set(Field::Name, "  Ana ");

        assert_eq!(draft.phone_display(), "(11) 98765-4321");
        assert_eq!(draft.phone_digits(), "11987654321");
        assert_eq!(draft.national_id_display(), "123.456.789-01");
        assert_eq!(draft.name(), "  Ana ");
    }

    #[test]
    fn default_state_is_editing_without_error() {
        assert_eq!(SubmissionState::default(), SubmissionState::Editing { error: None });
    }
}
