//! Single rendered note card.
//!
//! # Responsibility
//! - Hold the rendered body and the created-date caption for one note.
//! - Derive the caption from the key's embedded timestamp exactly once, on
//!   key assignment.
//!
//! # Invariants
//! - A card is constructed without a key and receives it through
//!   `assign_key` exactly once, immediately after insertion.
//! - Keys without an embedded timestamp leave the caption empty.

use crate::model::note::{parse_key_timestamp, NoteKey};
use crate::view::text::body_markup;

/// Short month names used by the created-date caption.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// One note's rendered representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    key: Option<NoteKey>,
    body_markup: String,
    caption: String,
}

impl NoteCard {
    /// Creates a card for the given raw body, not yet bound to a key.
    pub fn new(note_text: &str) -> Self {
        Self {
            key: None,
            body_markup: body_markup(note_text),
            caption: String::new(),
        }
    }

    /// Binds the card to its key and derives the created-date caption.
    ///
    /// Called once by the owning presenter right after insertion.
    pub fn assign_key(&mut self, key: impl Into<NoteKey>) {
        let key = key.into();
        self.caption = parse_key_timestamp(&key)
            .map(created_caption)
            .unwrap_or_default();
        self.key = Some(key);
    }

    /// Replaces the rendered body with a new raw text.
    pub fn set_body(&mut self, note_text: &str) {
        self.body_markup = body_markup(note_text);
    }

    /// Key this card is bound to, once assigned.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Escaped markup body with visual line breaks.
    pub fn body_markup(&self) -> &str {
        &self.body_markup
    }

    /// Created-date caption, empty for keys without a timestamp.
    pub fn caption(&self) -> &str {
        &self.caption
    }
}

fn created_caption(epoch_ms: i64) -> String {
    let (_, month, day) = civil_from_epoch_ms(epoch_ms);
    format!("Created on {} {}", MONTHS[(month - 1) as usize], day)
}

/// Converts epoch milliseconds to a UTC (year, month, day) civil date.
fn civil_from_epoch_ms(epoch_ms: i64) -> (i64, u32, u32) {
    let days = epoch_ms.div_euclid(86_400_000);
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::{civil_from_epoch_ms, NoteCard};

    #[test]
    fn assign_key_derives_created_caption() {
        // 2023-11-14T22:13:20Z
        let mut card = NoteCard::new("hello");
        card.assign_key("1700000000000");

        assert_eq!(card.key(), Some("1700000000000"));
        assert_eq!(card.caption(), "Created on Nov 14");
    }

    #[test]
    fn non_timestamp_key_leaves_caption_empty() {
        let mut card = NoteCard::new("hello");
        card.assign_key("foreign-key");

        assert_eq!(card.key(), Some("foreign-key"));
        assert_eq!(card.caption(), "");
    }

    #[test]
    fn body_is_rendered_with_line_breaks_and_updates_in_place() {
        let mut card = NoteCard::new("a\nb");
        assert_eq!(card.body_markup(), "a<br>b");

        card.set_body("replaced");
        assert_eq!(card.body_markup(), "replaced");
    }

    #[test]
    fn civil_date_conversion_matches_known_dates() {
        assert_eq!(civil_from_epoch_ms(0), (1970, 1, 1));
        // 2000-02-29T12:00:00Z, a leap day.
        assert_eq!(civil_from_epoch_ms(951_825_600_000), (2000, 2, 29));
        // 2023-11-14T22:13:20Z.
        assert_eq!(civil_from_epoch_ms(1_700_000_000_000), (2023, 11, 14));
        // One millisecond before the epoch lands on the previous day.
        assert_eq!(civil_from_epoch_ms(-1), (1969, 12, 31));
    }
}
