//! Records carrying per-locale text.
//!
//! The orchestrator only works with values implementing [`Translatable`].
//! [`MultilingualRecord`] is the concrete record used by the file-backed
//! store and the command line.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A field value is blank when it is empty after trimming.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Capability of a record that stores text per locale.
pub trait Translatable {
    /// Stable identifier used in logs and outcomes.
    fn record_id(&self) -> String;

    /// Names of the fields holding per-locale text. An empty list means the
    /// record does not take part in translation.
    fn translatable_fields(&self) -> Vec<String>;

    /// Text of `field` in `locale`; `None` when the slot is absent.
    fn translation(&self, field: &str, locale: &str) -> Option<&str>;

    fn set_translation(&mut self, field: &str, locale: &str, text: String);
}

/// Field name to locale to text.
pub type FieldTranslations = IndexMap<String, IndexMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultilingualRecord {
    pub id: String,
    #[serde(default)]
    pub fields: FieldTranslations,
    /// Set when a translation run has finished with this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl MultilingualRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
            finished_at: None,
        }
    }

    pub fn with_field<I, L, T>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(locale, text)| (locale.into(), text.into()))
            .collect();
        self.fields.insert(field.into(), values);
        self
    }
}

impl Translatable for MultilingualRecord {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn translatable_fields(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn translation(&self, field: &str, locale: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.get(locale))
            .map(String::as_str)
    }

    fn set_translation(&mut self, field: &str, locale: &str, text: String) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .insert(locale.to_string(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\t"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_translation_access() {
        let mut record = MultilingualRecord::new("post-1")
            .with_field("title", [("en", "Hello"), ("fr", "")]);

        assert_eq!(record.translatable_fields(), vec!["title".to_string()]);
        assert_eq!(record.translation("title", "en"), Some("Hello"));
        assert_eq!(record.translation("title", "de"), None);
        assert_eq!(record.translation("body", "en"), None);

        record.set_translation("title", "fr", "Bonjour".to_string());
        assert_eq!(record.translation("title", "fr"), Some("Bonjour"));
    }

    #[test]
    fn test_deserialize_without_finished_at() {
        let json = r#"{"id":"a","fields":{"title":{"en":"Hi","fr":""}}}"#;
        let record: MultilingualRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "a");
        assert!(record.finished_at.is_none());
        assert_eq!(record.translation("title", "fr"), Some(""));
    }
}
