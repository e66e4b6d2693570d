use chrono::Utc;
use rsvp_domain::registration::{NewRegistration, RegistrationRecord};
use rsvp_registration::controller::{Field, SubmissionController, SubmissionState, SubmitOutcome};
use rsvp_registration::store::RegistrationStore;
use rsvp_registration::{RegistrationError, UNKNOWN_ERROR_MESSAGE, ValidationError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct MockStore {
    inserts: AtomicUsize,
    received: Mutex<Vec<NewRegistration>>,
    failures: Mutex<VecDeque<String>>,
    gate: Option<Arc<Notify>>,
}

impl MockStore {
    fn gated(gate: Arc<Notify>) -> Self {
        Self { gate: Some(gate), ..Self::default() }
    }

    fn failing_once(message: &str) -> Self {
        let store = Self::default();
        store.failures.lock().unwrap().push_back(message.to_owned());
        store
    }

    fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

impl RegistrationStore for MockStore {
    async fn insert(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationRecord, RegistrationError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(registration.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some(message) => {
                Err(RegistrationError::Persistence { message: message.into(), context: None })
            },
            None => {
                Ok(RegistrationRecord::from_new("registration:test", registration, Utc::now()))
            },
        }
    }

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, RegistrationError> {
        Ok(Vec::new())
    }
}

fn fill<S: RegistrationStore>(form: &SubmissionController<S>) {
    form.update_field(Field::Name, "Ana Souza").unwrap();
    form.update_field(Field::Phone, "(11) 98765-4321").unwrap();
    form.update_field(Field::NationalId, "123.456.789-01").unwrap();
}

#[tokio::test]
async fn successful_submit_sends_canonical_digits() {
    let store = Arc::new(MockStore::default());
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    fill(&form);

    let outcome = form.submit().await;

    let SubmitOutcome::Confirmed(record) = outcome else {
        panic!("expected confirmation, got {outcome:?}");
    };
    assert_eq!(record.phone_digits, "11987654321");
    assert_eq!(record.national_id_digits, "12345678901");
    assert_eq!(store.inserts(), 1);
    assert_eq!(form.state(), SubmissionState::Success);
    assert_eq!(form.draft().name(), "");
}

#[tokio::test]
async fn empty_name_is_rejected_without_insert() {
    let store = Arc::new(MockStore::default());
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    form.update_field(Field::Name, "   ").unwrap();
    form.update_field(Field::Phone, "11987654321").unwrap();
    form.update_field(Field::NationalId, "12345678901").unwrap();

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MissingName));
    assert!(matches!(form.state(), SubmissionState::Editing { .. }));
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn short_phone_is_rejected_without_insert() {
    let store = Arc::new(MockStore::default());
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    form.update_field(Field::Name, "Ana").unwrap();
    form.update_field(Field::Phone, "119876").unwrap();
    form.update_field(Field::NationalId, "12345678901").unwrap();

    let outcome = form.submit().await;

    assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::PhoneTooShort { digits: 6 }));
    assert!(form.error().is_some());
    assert_eq!(store.inserts(), 0);
}

#[tokio::test]
async fn failed_insert_returns_to_editing_with_values_intact() {
    let store = Arc::new(MockStore::failing_once("duplicate national id"));
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    fill(&form);
    let before = form.draft();

    let outcome = form.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed { message: "Database error: duplicate national id".to_owned() }
    );
    assert_eq!(form.error().as_deref(), Some("Database error: duplicate national id"));
    assert_eq!(form.draft(), before);

    form.update_field(Field::Name, "Ana Souza").unwrap();
    assert_eq!(form.error(), None);

    assert!(matches!(form.submit().await, SubmitOutcome::Confirmed(_)));
    assert_eq!(store.inserts(), 2);
}

#[tokio::test]
async fn concurrent_submits_insert_once() {
    let gate = Arc::new(Notify::new());
    let store = Arc::new(MockStore::gated(Arc::clone(&gate)));
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    fill(&form);

    let first = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });

    while form.state() != SubmissionState::Submitting {
        tokio::task::yield_now().await;
    }

    assert_eq!(form.submit().await, SubmitOutcome::Busy);
    assert!(form.update_field(Field::Name, "Someone else").is_none());

    gate.notify_one();
    let outcome = first.await.expect("submit task");

    assert!(matches!(outcome, SubmitOutcome::Confirmed(_)));
    assert_eq!(store.inserts(), 1);
    assert_eq!(store.received.lock().unwrap()[0].name, "Ana Souza");
}

#[tokio::test]
async fn dropped_submit_returns_to_editing() {
    let gate = Arc::new(Notify::new());
    let store = Arc::new(MockStore::gated(Arc::clone(&gate)));
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    fill(&form);

    let timed_out = tokio::time::timeout(Duration::from_millis(50), form.submit()).await;
    assert!(timed_out.is_err());

    assert_eq!(
        form.state(),
        SubmissionState::Editing { error: Some(UNKNOWN_ERROR_MESSAGE.to_owned()) }
    );
    assert_eq!(form.draft().name(), "Ana Souza");
    assert!(form.update_field(Field::Name, "Ana Souza").is_some());
    assert_eq!(form.error(), None);

    gate.notify_one();
    assert!(matches!(form.submit().await, SubmitOutcome::Confirmed(_)));
    assert_eq!(store.inserts(), 2);
}

#[tokio::test]
async fn aborted_submit_task_returns_to_editing() {
    let gate = Arc::new(Notify::new());
    let store = Arc::new(MockStore::gated(Arc::clone(&gate)));
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    fill(&form);

    let task = tokio::spawn({
        let form = form.clone();
        async move { form.submit().await }
    });
    while form.state() != SubmissionState::Submitting {
        tokio::task::yield_now().await;
    }

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert!(matches!(form.state(), SubmissionState::Editing { error: Some(_) }));

    gate.notify_one();
    assert!(matches!(form.submit().await, SubmitOutcome::Confirmed(_)));
    assert_eq!(store.inserts(), 2);
}

#[tokio::test]
async fn finished_session_ignores_further_input() {
    let store = Arc::new(MockStore::default());
    let form = SubmissionController::with_shared_store(Arc::clone(&store));
    fill(&form);
    assert!(matches!(form.submit().await, SubmitOutcome::Confirmed(_)));

    assert_eq!(form.submit().await, SubmitOutcome::Closed);
    assert!(form.update_field(Field::Phone, "1").is_none());
    assert_eq!(store.inserts(), 1);
}

#[test]
fn masked_fields_stop_at_the_digit_cap() {
    let form = SubmissionController::new(MockStore::default());

    let draft = form.update_field(Field::Phone, "119876543219999").unwrap();
    assert_eq!(draft.phone_display(), "(11) 98765-4321");

    let draft = form.update_field(Field::NationalId, "1234567890123").unwrap();
    assert_eq!(draft.national_id_display(), "123.456.789-01");
}
