use crate::error::ValidationError;
use crate::mask::{NATIONAL_ID_DIGITS, PHONE_MIN_DIGITS, normalize_digits};
use rsvp_domain::registration::NewRegistration;

/// Canonicalizes raw or display-formatted input into an insert payload.
///
/// The name is trimmed. Digit fields are stripped of separators and capped.
///
/// # Errors
/// Returns the first failing rule: missing name, short phone, incomplete national ID.
pub fn canonical_registration(
    name: &str,
    phone: &str,
    national_id: &str,
) -> Result<NewRegistration, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let phone_digits = normalize_digits(phone);
    if phone_digits.len() < PHONE_MIN_DIGITS {
        return Err(ValidationError::PhoneTooShort { digits: phone_digits.len() });
    }

    let national_id_digits = normalize_digits(national_id);
    if national_id_digits.len() != NATIONAL_ID_DIGITS {
        return Err(ValidationError::NationalIdIncomplete { digits: national_id_digits.len() });
    }

    Ok(NewRegistration { name: name.to_owned(), phone_digits, national_id_digits })
}
