//! Core types used throughout the project.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Flattened translation key map for a single locale (e.g., "common.hello" -> "Hello").
pub type FlatMap = HashMap<String, TranslationValue>;

/// Locale code → flattened translations.
pub type TranslationsByLocale = HashMap<String, FlatMap>;

/// A stored translation value.
///
/// Serialized untagged, so a value renders as either a JSON string or a JSON
/// array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TranslationValue {
    Text(String),
    List(Vec<String>),
}

impl TranslationValue {
    /// Returns the text if this is a single string value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Returns the items if this is a string list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<&str> for TranslationValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for TranslationValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for TranslationValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}
