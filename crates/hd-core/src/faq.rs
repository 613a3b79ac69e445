//! Exact-match FAQ tables.
//!
//! Tables are built once at startup and only read afterwards; share them
//! behind an `Arc`.

use std::{collections::HashMap, fs, path::Path};

use crate::{errors::Error, Result};

pub const DEFAULT_LANGUAGE: &str = "en";

const BUILTIN_EN: &[(&str, &str)] = &[
    (
        "What are your working hours?",
        "Our support team is available 24/7.",
    ),
    (
        "How can I reset my password?",
        "You can reset your password by clicking on 'Forgot Password' on the login page.",
    ),
    (
        "Do you offer refunds?",
        "Yes, we offer refunds within 30 days of purchase.",
    ),
];

const BUILTIN_ES: &[(&str, &str)] = &[
    (
        "What are your working hours?",
        "Nuestro equipo de soporte está disponible 24/7.",
    ),
    (
        "How can I reset my password?",
        "Puede restablecer su contraseña haciendo clic en 'Olvidé mi contraseña' en la página de inicio de sesión.",
    ),
    (
        "Do you offer refunds?",
        "Sí, ofrecemos reembolsos dentro de los 30 días posteriores a la compra.",
    ),
];

/// Question → canned answer, matched by exact string equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaqTable {
    entries: HashMap<String, String>,
}

impl FaqTable {
    pub fn get(&self, question: &str) -> Option<&str> {
        self.entries.get(question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<Q: Into<String>, A: Into<String>> FromIterator<(Q, A)> for FaqTable {
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(q, a)| (q.into(), a.into()))
                .collect(),
        }
    }
}

/// FAQ tables keyed by language code, with a fallback language.
#[derive(Clone, Debug)]
pub struct FaqCatalog {
    tables: HashMap<String, FaqTable>,
    default_language: String,
}

impl FaqCatalog {
    /// Catalog with the built-in English and Spanish tables.
    pub fn builtin() -> Self {
        let mut tables: HashMap<String, FaqTable> = HashMap::new();
        tables.insert("en".to_string(), BUILTIN_EN.iter().copied().collect());
        tables.insert("es".to_string(), BUILTIN_ES.iter().copied().collect());
        Self {
            tables,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Build a catalog from explicit tables. `default_language` must be one of them.
    pub fn new(tables: HashMap<String, FaqTable>, default_language: &str) -> Result<Self> {
        if !tables.contains_key(default_language) {
            return Err(Error::Config(format!(
                "FAQ catalog has no table for default language {default_language:?}"
            )));
        }
        Ok(Self {
            tables,
            default_language: default_language.to_string(),
        })
    }

    /// Parse `{"<lang>": {"<question>": "<answer>", ...}, ...}`.
    pub fn from_json_str(json: &str, default_language: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
        let tables: HashMap<String, FaqTable> = raw
            .into_iter()
            .map(|(lang, entries)| (lang, entries.into_iter().collect()))
            .collect();
        Self::new(tables, default_language)
    }

    pub fn from_file(path: &Path, default_language: &str) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json, default_language)
    }

    /// Switch the fallback language of an existing catalog.
    pub fn with_default_language(self, default_language: &str) -> Result<Self> {
        Self::new(self.tables, default_language)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Exact-match lookup. Unknown or missing languages use the default table.
    pub fn lookup(&self, language: Option<&str>, question: &str) -> Option<&str> {
        language
            .and_then(|l| self.tables.get(l))
            .or_else(|| self.tables.get(&self.default_language))
            .and_then(|t| t.get(question))
    }
}

impl Default for FaqCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_answers_known_questions() {
        let faq = FaqCatalog::builtin();
        assert_eq!(
            faq.lookup(None, "What are your working hours?"),
            Some("Our support team is available 24/7.")
        );
        assert_eq!(
            faq.lookup(Some("en"), "How can I reset my password?"),
            Some("You can reset your password by clicking on 'Forgot Password' on the login page.")
        );
    }

    #[test]
    fn lookup_is_exact_match_only() {
        let faq = FaqCatalog::builtin();
        assert_eq!(faq.lookup(None, "what are your working hours?"), None);
        assert_eq!(faq.lookup(None, "What are your working hours? "), None);
        assert_eq!(faq.lookup(None, "working hours"), None);
    }

    #[test]
    fn language_selects_table_and_unknown_falls_back() {
        let faq = FaqCatalog::builtin();
        assert_eq!(
            faq.lookup(Some("es"), "Do you offer refunds?"),
            Some("Sí, ofrecemos reembolsos dentro de los 30 días posteriores a la compra.")
        );
        assert_eq!(
            faq.lookup(Some("fr"), "Do you offer refunds?"),
            Some("Yes, we offer refunds within 30 days of purchase.")
        );
    }

    #[test]
    fn json_catalog_requires_default_language() {
        let json = r#"{"de": {"Hallo?": "Hallo!"}}"#;
        let err = FaqCatalog::from_json_str(json, "en").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let faq = FaqCatalog::from_json_str(json, "de").unwrap();
        assert_eq!(faq.lookup(None, "Hallo?"), Some("Hallo!"));
        assert_eq!(faq.default_language(), "de");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = FaqCatalog::from_json_str(r#"{"en": ["not", "a", "map"]}"#, "en").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn from_file_reads_catalog() {
        let path = std::env::temp_dir().join(format!("hd-faq-test-{}.json", std::process::id()));
        fs::write(&path, r#"{"en": {"Ping?": "Pong."}}"#).unwrap();
        let faq = FaqCatalog::from_file(&path, "en").unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(faq.lookup(Some("en"), "Ping?"), Some("Pong."));
    }
}
