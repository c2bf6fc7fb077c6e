use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// One rejected setting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field_path}: {message}")]
pub struct ValidationError {
    /// Setting name as written in the settings file (e.g. "keySeparator")
    pub field_path: String,
    /// What is wrong with the value
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid store settings:\n{}", bullet_list(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Failed to read the settings file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Settings file is not valid JSON for the store: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One indented `- field: message` line per error
fn bullet_list(errors: &[ValidationError]) -> String {
    errors.iter().map(|err| format!("  - {err}")).collect::<Vec<_>>().join("\n")
}

/// How arrays containing non-string elements are treated when a JSON
/// document is turned into a translation tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayElementPolicy {
    /// Log a warning and keep the array, rendering non-string elements as JSON text.
    #[default]
    Warn,
    /// Refuse the document.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Joins nested key segments when flattening.
    pub key_separator: String,

    pub array_elements: ArrayElementPolicy,
}

impl StoreSettings {
    /// # Errors
    /// - Invalid separator
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "must not be empty, nested keys could not be told apart",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { key_separator: ".".to_string(), array_elements: ArrayElementPolicy::default() }
    }
}
