use rsvp_derive::rsvp_error;
use std::borrow::Cow;

#[rsvp_error]
pub enum SubmitError {
    #[error("Store unavailable{}: {source}", format_context(.context))]
    Store {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_snapshot() -> Result<String, SubmitError> {
    let text = std::fs::read_to_string("/definitely/missing").context("Reading snapshot")?;
    Ok(text)
}

fn main() {
    let err = read_snapshot().unwrap_err();
    assert!(err.to_string().contains("(Reading snapshot)"));

    let internal: SubmitError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");
}
