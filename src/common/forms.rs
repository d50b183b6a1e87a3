// src/common/forms.rs
//
// Normalização de campos de formulário.

use serde::{Deserialize, Deserializer, de};
use uuid::Uuid;
use validator::ValidationError;

/// Campo opcional: texto em branco vira `None`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Campo opcional em um PATCH: ausente não muda nada, texto em branco limpa.
pub fn patch_optional(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| blank_to_none(Some(v)))
}

/// Seletor de formulário: `""` (nada escolhido) equivale a campo ausente.
pub fn blank_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw).map(Some).map_err(de::Error::custom),
    }
}

/// Validador para campos obrigatórios de texto.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_cleared() {
        assert_eq!(blank_to_none(Some("   ".into())), None);
        assert_eq!(blank_to_none(Some(" Ana ".into())), Some("Ana".into()));
        assert_eq!(patch_optional(None), None);
        assert_eq!(patch_optional(Some(String::new())), Some(None));
    }

    #[derive(Deserialize)]
    struct Selector {
        #[serde(default, deserialize_with = "blank_uuid")]
        id: Option<Uuid>,
    }

    #[test]
    fn empty_selector_is_absent() {
        let id = Uuid::new_v4();
        let picked: Selector = serde_json::from_value(serde_json::json!({ "id": id.to_string() })).unwrap();
        assert_eq!(picked.id, Some(id));

        for raw in [serde_json::json!({ "id": "" }), serde_json::json!({ "id": null }), serde_json::json!({})] {
            let empty: Selector = serde_json::from_value(raw).unwrap();
            assert_eq!(empty.id, None);
        }
        assert!(serde_json::from_value::<Selector>(serde_json::json!({ "id": "abc" })).is_err());
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank(" \t").is_err());
        assert!(not_blank("x").is_ok());
    }
}
