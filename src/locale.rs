use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from locale code to display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCatalog {
    locales: IndexMap<String, String>,
}

impl LocaleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.locales.insert(code.into(), name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.locales.get(code).map(String::as_str)
    }

    /// Display name, or the capitalized code when the locale is unknown.
    pub fn display_name_or_code(&self, code: &str) -> String {
        match self.display_name(code) {
            Some(name) => name.to_string(),
            None => {
                let mut chars = code.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.locales.iter().map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Locales selectable as a target once `source` is chosen.
    pub fn target_options<'a>(&'a self, source: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter().filter(move |(code, _)| *code != source)
    }
}

impl FromIterator<(String, String)> for LocaleCatalog {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            locales: iter.into_iter().collect(),
        }
    }
}
