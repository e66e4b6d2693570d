use anyhow::{Result, bail};
use rsvp::domain::event::EventDetails;
use rsvp::features::registration::ValidationError;
use rsvp::features::registration::controller::{
    Field, RegistrationDraft, SubmissionController, SubmitOutcome,
};
use rsvp::features::registration::store::RegistrationStore;
use std::io::{BufRead, Write};

/// Values given on the command line; missing ones are prompted for.
#[derive(Debug, Default)]
pub(crate) struct Prefill {
    pub(crate) name: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) national_id: Option<String>,
}

pub(crate) fn print_event(out: &mut impl Write, event: &EventDetails) -> Result<()> {
    writeln!(out, "{}", event.title)?;
    writeln!(out, "{}", event.description)?;
    writeln!(out, "Where: {}", event.venue)?;
    writeln!(out, "When:  {}", event.starts_at)?;
    writeln!(out)?;
    Ok(())
}

/// Drives one form session to a confirmed registration.
///
/// Invalid fields are asked for again. After a store failure the values are
/// kept and the user decides whether to retry.
pub(crate) async fn run<S, R, W>(
    store: S,
    prefill: Prefill,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: RegistrationStore,
    R: BufRead,
    W: Write,
{
    let form = SubmissionController::new(store);

    let given = [
        (Field::Name, prefill.name),
        (Field::Phone, prefill.phone),
        (Field::NationalId, prefill.national_id),
    ];
    for (field, given) in given {
        match given {
            Some(value) => {
                form.update_field(field, &value);
            },
            None => ask(&form, field, input, out)?,
        }
    }

    loop {
        match form.submit().await {
            SubmitOutcome::Confirmed(record) => {
                writeln!(out, "You're on the list, {}!", record.name)?;
                return Ok(());
            },
            SubmitOutcome::Invalid(err) => {
                writeln!(out, "{err}")?;
                ask(&form, invalid_field(&err), input, out)?;
            },
            SubmitOutcome::Failed { message } => {
                writeln!(out, "{message}")?;
                if !confirm("Try again?", input, out)? {
                    bail!("Registration not sent");
                }
            },
            SubmitOutcome::Busy | SubmitOutcome::Closed => return Ok(()),
        }
    }
}

const fn invalid_field(err: &ValidationError) -> Field {
    match err {
        ValidationError::MissingName => Field::Name,
        ValidationError::PhoneTooShort { .. } => Field::Phone,
        ValidationError::NationalIdIncomplete { .. } => Field::NationalId,
    }
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Name => "Full name",
        Field::Phone => "Phone",
        Field::NationalId => "National ID",
    }
}

fn current(draft: &RegistrationDraft, field: Field) -> &str {
    match field {
        Field::Name => draft.name(),
        Field::Phone => draft.phone_display(),
        Field::NationalId => draft.national_id_display(),
    }
}

/// Prompts for `field`; an empty answer keeps the current value.
fn ask<S, R, W>(
    form: &SubmissionController<S>,
    field: Field,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: RegistrationStore,
    R: BufRead,
    W: Write,
{
    let draft = form.draft();
    let existing = current(&draft, field);

    if existing.is_empty() {
        write!(out, "{}: ", label(field))?;
    } else {
        write!(out, "{} [{existing}]: ", label(field))?;
    }
    out.flush()?;

    let line = read_line(input)?;
    if line.is_empty() {
        return Ok(());
    }

    if let Some(updated) = form.update_field(field, &line)
        && field != Field::Name
    {
        writeln!(out, "  -> {}", current(&updated, field))?;
    }
    Ok(())
}

fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "{question} [Y/n]: ")?;
    out.flush()?;
    let answer = read_line(input)?;
    Ok(!answer.eq_ignore_ascii_case("n") && !answer.eq_ignore_ascii_case("no"))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Input closed before the form was sent");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rsvp::domain::registration::{NewRegistration, RegistrationRecord};
    use rsvp::features::registration::RegistrationError;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingStore {
        fail_first: bool,
        calls: Mutex<Vec<NewRegistration>>,
    }

    impl RegistrationStore for RecordingStore {
        async fn insert(
            &self,
            registration: NewRegistration,
        ) -> Result<RegistrationRecord, RegistrationError> {
            let attempt = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(registration.clone());
                calls.len()
            };

            if self.fail_first && attempt == 1 {
                return Err(RegistrationError::Persistence {
                    message: "connection reset".into(),
                    context: None,
                });
            }
            Ok(RegistrationRecord::from_new("registration:1", registration, Utc::now()))
        }

        async fn list_all(&self) -> Result<Vec<RegistrationRecord>, RegistrationError> {
            Ok(Vec::new())
        }
    }

    async fn drive(store: RecordingStore, prefill: Prefill, input: &str) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run(store, prefill, &mut Cursor::new(input.to_owned()), &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn prompts_mask_and_confirm() {
        let (result, out) =
            drive(RecordingStore::default(), Prefill::default(), "Ana\n11987654321\n12345678901\n")
                .await;

        result.unwrap();
        assert!(out.contains("-> (11) 98765-4321"));
        assert!(out.contains("-> 123.456.789-01"));
        assert!(out.contains("You're on the list, Ana!"));
    }

    #[tokio::test]
    async fn invalid_field_is_asked_again() {
        let prefill = Prefill {
            name: Some("Ana".to_owned()),
            phone: Some("1198".to_owned()),
            national_id: Some("12345678901".to_owned()),
        };

        let (result, out) = drive(RecordingStore::default(), prefill, "1133334444\n").await;

        result.unwrap();
        assert!(out.contains("Phone number needs at least 10 digits (got 4)"));
        assert!(out.contains("Phone [(11) 98]: "));
    }

    #[tokio::test]
    async fn failure_keeps_values_and_retries() {
        let store = RecordingStore { fail_first: true, ..RecordingStore::default() };
        let prefill = Prefill {
            name: Some("Ana".to_owned()),
            phone: Some("(11) 98765-4321".to_owned()),
            national_id: Some("123.456.789-01".to_owned()),
        };

        let (result, out) = drive(store, prefill, "\n").await;

        result.unwrap();
        assert!(out.contains("Database error: connection reset"));
        assert!(out.contains("You're on the list, Ana!"));
    }

    #[tokio::test]
    async fn closed_input_aborts() {
        let (result, _) = drive(RecordingStore::default(), Prefill::default(), "Ana\n").await;
        assert!(result.is_err());
    }
}
