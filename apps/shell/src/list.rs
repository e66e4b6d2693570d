use anyhow::{Context, Result};
use rsvp::features::registration::listing::{AttendeeCard, EMPTY_LIST_MESSAGE, attendee_cards};
use rsvp::features::registration::store::RegistrationStore;
use std::io::Write;

pub(crate) async fn run<S: RegistrationStore>(store: &S, out: &mut impl Write) -> Result<()> {
    let records = store.list_all().await.context("Loading attendees")?;
    render(&attendee_cards(&records), out)
}

fn render(cards: &[AttendeeCard], out: &mut impl Write) -> Result<()> {
    if cards.is_empty() {
        writeln!(out, "{EMPTY_LIST_MESSAGE}")?;
        return Ok(());
    }

    writeln!(out, "{} confirmed", cards.len())?;
    for card in cards {
        writeln!(
            out,
            "[{}] {:<28} {:<16} {:<15} {}",
            card.initial, card.name, card.phone, card.national_id, card.registered_at
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> AttendeeCard {
        AttendeeCard {
            initial: name.chars().next().unwrap_or('?'),
            name: name.to_owned(),
            phone: "(11) 98765-4321".to_owned(),
            national_id: "123.456.789-01".to_owned(),
            registered_at: "14/03/2026 at 21:05".to_owned(),
        }
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let mut out = Vec::new();
        render(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), EMPTY_LIST_MESSAGE);
    }

    #[test]
    fn cards_are_listed_with_count() {
        let mut out = Vec::new();
        render(&[card("Bia"), card("Ana")], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "2 confirmed");
        assert!(lines[1].starts_with("[B] Bia"));
        assert!(lines[2].contains("123.456.789-01"));
    }
}
