//! Field aliasing for search-result source documents.
//!
//! The upstream schema is not fixed: different tribunals publish the movement
//! list and its fields under different names. Each logical field is read from
//! an ordered list of candidate keys and the first usable value wins.

use serde_json::{Map, Value};

use crate::domain::Movement;

pub const MOVEMENT_LIST_KEYS: &[&str] = &["movimentos", "movimentacoes", "movimento"];

pub const DATE_KEYS: &[&str] = &["dataHora", "data", "dataMovimento"];

pub const TITLE_KEYS: &[&str] = &["nome", "titulo", "descricao"];

pub const DESCRIPTION_KEYS: &[&str] = &["complemento", "texto"];

/// The first non-empty movement array in the source, or an empty slice.
#[must_use]
pub fn movement_list(source: &Map<String, Value>) -> &[Value] {
    MOVEMENT_LIST_KEYS
        .iter()
        .filter_map(|key| source.get(*key).and_then(Value::as_array))
        .find(|list| !list.is_empty())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// The last movement in API order, which the upstream treats as the newest.
/// Entries that are not objects are skipped.
#[must_use]
pub fn latest_movement(source: &Map<String, Value>) -> Option<Movement> {
    movement_list(source)
        .iter()
        .rev()
        .find_map(Value::as_object)
        .map(Movement::from_entry)
}

/// Text of the first alias holding a usable value; empty when none does.
#[must_use]
pub fn field_text(entry: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| entry.get(*key))
        .find_map(value_text)
        .unwrap_or_default()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn extracts_from_primary_key() {
        let doc = source(json!({
            "movimentos": [
                { "dataHora": "2024-01-01", "nome": "A" },
                { "dataHora": "2024-02-01", "nome": "B", "complemento": "x" }
            ]
        }));

        assert_eq!(movement_list(&doc).len(), 2);
        assert_eq!(
            latest_movement(&doc),
            Some(Movement::new("2024-02-01", "B", "x"))
        );
    }

    #[test]
    fn falls_back_to_second_alias() {
        let doc = source(json!({
            "movimentacoes": [{ "data": "2024-05-05", "titulo": "Sentença" }]
        }));

        let latest = latest_movement(&doc).unwrap();
        assert_eq!(latest, Movement::new("2024-05-05", "Sentença", ""));
    }

    #[test]
    fn skips_empty_list_for_later_alias() {
        let doc = source(json!({
            "movimentos": [],
            "movimento": [{ "nome": "Baixa" }]
        }));

        assert_eq!(latest_movement(&doc), Some(Movement::new("", "Baixa", "")));
    }

    #[test]
    fn ignores_non_list_values() {
        let doc = source(json!({ "movimentos": { "nome": "not a list" } }));
        assert!(movement_list(&doc).is_empty());
        assert!(latest_movement(&doc).is_none());
    }

    #[test]
    fn missing_list_yields_nothing() {
        let doc = source(json!({ "numeroProcesso": "0001" }));
        assert!(latest_movement(&doc).is_none());
    }

    #[test]
    fn latest_is_last_object_entry() {
        let doc = source(json!({
            "movimentos": [{ "nome": "A" }, { "nome": "B" }, 42]
        }));
        assert_eq!(latest_movement(&doc).unwrap().title, "B");
    }

    #[test]
    fn field_text_skips_null_and_empty() {
        let entry = source(json!({ "nome": null, "titulo": "", "descricao": "Despacho" }));
        assert_eq!(field_text(&entry, TITLE_KEYS), "Despacho");
    }

    #[test]
    fn field_text_renders_scalars() {
        let entry = source(json!({ "data": 20240101, "complemento": true }));
        assert_eq!(field_text(&entry, DATE_KEYS), "20240101");
        assert_eq!(field_text(&entry, DESCRIPTION_KEYS), "true");
    }
}
