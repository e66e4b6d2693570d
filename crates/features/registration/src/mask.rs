//! Keystroke masking for phone numbers and national IDs.
//!
//! Every function here is pure and total. Display strings are always derived
//! from a canonical digit sequence, and [`unformat`] recovers that sequence.

/// Hard cap on digits for either masked field.
pub const MAX_DIGITS: usize = 11;
/// A phone is complete with a two-digit area code and at least eight local digits.
pub const PHONE_MIN_DIGITS: usize = 10;
/// National IDs have exactly this many digits.
pub const NATIONAL_ID_DIGITS: usize = 11;

/// Display masks applied to raw keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    /// `(DD) DDDDD-DDDD` or `(DD) DDDD-DDDD`.
    Phone,
    /// `DDD.DDD.DDD-DD`.
    NationalId,
}

impl Mask {
    /// Normalizes `raw` and formats the result for display.
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        let digits = normalize_digits(raw);
        match self {
            Self::Phone => format_phone(&digits),
            Self::NationalId => format_national_id(&digits),
        }
    }
}

/// Keeps ASCII digits only and truncates to [`MAX_DIGITS`].
#[must_use]
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(MAX_DIGITS).collect()
}

/// Strips every non-digit from a display string.
#[must_use]
pub fn unformat(display: &str) -> String {
    display.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a phone number progressively as digits arrive.
///
/// Up to two digits are shown as typed. From the third digit on the area
/// code is parenthesized. The hyphen follows the fourth local digit for
/// landlines (up to ten digits) and the fifth for eleven-digit mobiles.
#[must_use]
pub fn format_phone(digits: &str) -> String {
    let d = normalize_digits(digits);

    match d.len() {
        0..=2 => d,
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Formats a national ID as `DDD.DDD.DDD-DD`, adding a separator only once
/// a digit follows it.
#[must_use]
pub fn format_national_id(digits: &str) -> String {
    let d = normalize_digits(digits);
    let mut out = String::with_capacity(d.len() + 3);

    for (i, c) in d.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {},
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_and_truncates() {
        assert_eq!(normalize_digits("(11) 98765-4321"), "11987654321");
        assert_eq!(normalize_digits("abc"), "");
        assert_eq!(normalize_digits("1234567890123"), "12345678901");
        assert_eq!(normalize_digits("٣4"), "4");
    }

    #[test]
    fn phone_is_formatted_progressively() {
        let cases = [
            ("", ""),
            ("1", "1"),
            ("11", "11"),
            ("119", "(11) 9"),
            ("119876", "(11) 9876"),
            ("1198765", "(11) 9876-5"),
            ("1133334444", "(11) 3333-4444"),
            ("11987654321", "(11) 98765-4321"),
        ];

        for (digits, expected) in cases {
            assert_eq!(format_phone(digits), expected, "digits: {digits}");
        }
    }

    #[test]
    fn national_id_separators_wait_for_next_digit() {
        let cases = [
            ("", ""),
            ("123", "123"),
            ("1234", "123.4"),
            ("123456", "123.456"),
            ("1234567", "123.456.7"),
            ("123456789", "123.456.789"),
            ("1234567890", "123.456.789-0"),
            ("12345678901", "123.456.789-01"),
        ];

        for (digits, expected) in cases {
            assert_eq!(format_national_id(digits), expected, "digits: {digits}");
        }
    }

    #[test]
    fn keystrokes_past_the_cap_are_ignored() {
        let full = Mask::Phone.apply("11987654321");
        assert_eq!(Mask::Phone.apply(&format!("{full}9")), full);

        let id = Mask::NationalId.apply("12345678901");
        assert_eq!(Mask::NationalId.apply(&format!("{id}0")), id);
    }

    #[test]
    fn no_separator_trails_the_last_digit() {
        for len in 0..=MAX_DIGITS {
            let digits = "9".repeat(len);
            for display in [format_phone(&digits), format_national_id(&digits)] {
                assert!(display.is_empty() || display.ends_with('9'), "{display:?}");
            }
        }
    }
}
