//! Display model for the confirmed-attendees view.

use crate::mask::{NATIONAL_ID_DIGITS, format_national_id, format_phone, unformat};
use chrono::{Local, TimeZone};
use rsvp_domain::registration::RegistrationRecord;

/// Shown when nobody has registered yet.
pub const EMPTY_LIST_MESSAGE: &str = "No one has confirmed yet.";

const REGISTERED_AT_FORMAT: &str = "%d/%m/%Y at %H:%M";

/// One attendee as presented in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeCard {
    pub initial: char,
    pub name: String,
    pub phone: String,
    pub national_id: String,
    pub registered_at: String,
}

impl AttendeeCard {
    /// Builds a card with the registration time in the local time zone.
    #[must_use]
    pub fn from_record(record: &RegistrationRecord) -> Self {
        Self::from_record_in(record, &Local)
    }

    /// Builds a card with the registration time shown in `tz`.
    ///
    /// National IDs without exactly eleven digits are shown as stored.
    #[must_use]
    pub fn from_record_in<Tz>(record: &RegistrationRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let name = record.name.trim();
        let initial = name.chars().next().map_or('?', |c| c.to_uppercase().next().unwrap_or(c));

        let id_digits = unformat(&record.national_id_digits);
        let national_id = if id_digits.len() == NATIONAL_ID_DIGITS {
            format_national_id(&id_digits)
        } else {
            record.national_id_digits.clone()
        };

        Self {
            initial,
            name: name.to_owned(),
            phone: format_phone(&unformat(&record.phone_digits)),
            national_id,
            registered_at: record
                .created_at
                .with_timezone(tz)
                .format(REGISTERED_AT_FORMAT)
                .to_string(),
        }
    }
}

/// Cards in display order (newest first).
#[must_use]
pub fn attendee_cards(records: &[RegistrationRecord]) -> Vec<AttendeeCard> {
    let mut records = records.to_vec();
    rsvp_domain::registration::sort_newest_first(&mut records);
    records.iter().map(AttendeeCard::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn record(name: &str, phone: &str, national_id: &str) -> RegistrationRecord {
        RegistrationRecord {
            id: "registration:one".to_owned(),
            name: name.to_owned(),
            phone_digits: phone.to_owned(),
            national_id_digits: national_id.to_owned(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 21, 5, 0).unwrap(),
        }
    }

    #[test]
    fn card_formats_stored_digits() {
        let card = AttendeeCard::from_record_in(&record("ana", "11987654321", "12345678901"), &Utc);

        assert_eq!(card.initial, 'A');
        assert_eq!(card.phone, "(11) 98765-4321");
        assert_eq!(card.national_id, "123.456.789-01");
        assert_eq!(card.registered_at, "14/03/2026 at 21:05");
    }

    #[test]
    fn short_national_id_is_shown_as_stored() {
        let card = AttendeeCard::from_record_in(&record("Bia", "1133334444", "12345"), &Utc);
        assert_eq!(card.national_id, "12345");
        assert_eq!(card.phone, "(11) 3333-4444");
    }

    #[test]
    fn blank_name_gets_placeholder_initial() {
        let card = AttendeeCard::from_record_in(&record("   ", "", ""), &Utc);
        assert_eq!(card.initial, '?');
        assert_eq!(card.phone, "");
    }

    #[test]
    fn time_follows_the_given_zone() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let card = AttendeeCard::from_record_in(&record("Ana", "", ""), &brt);
        assert_eq!(card.registered_at, "14/03/2026 at 18:05");
    }
}
