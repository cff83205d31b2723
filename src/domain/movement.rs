use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::limits::MAX_TITLE_CHARS;
use crate::domain::fingerprint::movement_fingerprint;
use crate::parser::date::parse_movement_date;
use crate::parser::movements::{DATE_KEYS, DESCRIPTION_KEYS, TITLE_KEYS, field_text};

/// The text of one case movement as reported by the search API.
///
/// Missing fields are empty strings, never absent, so that fingerprints are
/// always computed over the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Movement {
    pub date: String,
    pub title: String,
    pub description: String,
}

impl Movement {
    #[must_use]
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Reads a raw movement entry, resolving each field through its alias list.
    #[must_use]
    pub fn from_entry(entry: &Map<String, Value>) -> Self {
        Self {
            date: field_text(entry, DATE_KEYS),
            title: field_text(entry, TITLE_KEYS),
            description: field_text(entry, DESCRIPTION_KEYS),
        }
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        movement_fingerprint(&self.date, &self.title, &self.description)
    }

    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        parse_movement_date(&self.date)
    }

    /// Title cut to the stored column width, counted in characters.
    #[must_use]
    pub fn stored_title(&self) -> String {
        truncate_chars(&self.title, MAX_TITLE_CHARS)
    }
}

#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_entry_uses_first_alias_present() {
        let entry = json!({
            "data": "2024-03-01",
            "dataMovimento": "ignored",
            "titulo": "Juntada",
            "texto": "Petição"
        });
        let movement = Movement::from_entry(entry.as_object().unwrap());
        assert_eq!(movement, Movement::new("2024-03-01", "Juntada", "Petição"));
    }

    #[test]
    fn from_entry_defaults_missing_fields_to_empty() {
        let entry = json!({ "nome": "Conclusos" });
        let movement = Movement::from_entry(entry.as_object().unwrap());
        assert_eq!(movement, Movement::new("", "Conclusos", ""));
    }

    #[test]
    fn stored_title_truncates_to_limit() {
        let movement = Movement::new("", "é".repeat(MAX_TITLE_CHARS + 20), "");
        let title = movement.stored_title();
        assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
    }

    #[test]
    fn truncate_chars_keeps_short_text() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn occurred_at_is_none_for_garbage() {
        assert!(Movement::new("yesterday", "", "").occurred_at().is_none());
    }
}
