// src/common/i18n.rs

use std::collections::HashMap;

use anyhow::Context;

/// Idioma usado quando o cliente não pede nenhum, ou pede um sem catálogo.
pub const DEFAULT_LANGUAGE: &str = "pt";

const CATALOGS: &[(&str, &str)] = &[
    ("pt", include_str!("../../locales/pt.json")),
    ("en", include_str!("../../locales/en.json")),
];

/// Catálogos de mensagens por idioma, indexados pelo código do erro.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl I18nStore {
    pub fn load() -> anyhow::Result<Self> {
        let mut catalogs = HashMap::new();
        for (lang, raw) in CATALOGS {
            let messages: HashMap<String, String> = serde_json::from_str(raw)
                .with_context(|| format!("Catálogo de mensagens '{lang}' inválido"))?;
            catalogs.insert((*lang).to_string(), messages);
        }
        Ok(Self { catalogs })
    }

    /// Traduz `key`; cai para o idioma padrão e, por fim, devolve a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(DEFAULT_LANGUAGE, key))
            .unwrap_or(key)
            .to_string()
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.catalogs
            .get(lang)
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_share_the_same_keys() {
        let store = I18nStore::load().unwrap();
        let pt = &store.catalogs["pt"];
        let en = &store.catalogs["en"];
        let mut missing: Vec<_> = pt.keys().filter(|k| !en.contains_key(*k)).collect();
        missing.extend(en.keys().filter(|k| !pt.contains_key(*k)));
        assert!(missing.is_empty(), "chaves sem tradução: {missing:?}");
    }

    #[test]
    fn falls_back_to_default_language_then_key() {
        let store = I18nStore::load().unwrap();
        assert_eq!(
            store.translate("fr", "client_not_found"),
            store.translate("pt", "client_not_found")
        );
        assert_eq!(store.translate("en", "no_such_key"), "no_such_key");
        assert_eq!(store.translate("en", "client_not_found"), "Client not found.");
    }
}
