//! Serializable store operations

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// One store operation as a `{ "type": ..., "locale": ..., "translations": ... }` payload.
///
/// `translations` holds the raw JSON tree; it is converted using the store's
/// array policy when the action is dispatched. Unknown fields are ignored.
///
/// # Examples
/// ```
/// use locale_store::Action;
///
/// let action = Action::from_json_str(
///     r#"{ "type": "addLocale", "locale": "en", "translations": { "Hello": "Hi" } }"#,
/// ).unwrap();
///
/// assert_eq!(action.name(), "addLocale");
/// assert_eq!(action.locale(), Some("en"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// `null` clears the current locale.
    SetLocale {
        #[serde(default)]
        locale: Option<String>,
    },
    AddLocale {
        locale: String,
        #[serde(default)]
        translations: Value,
    },
    ReplaceLocale {
        locale: String,
        #[serde(default)]
        translations: Value,
    },
    RemoveLocale {
        locale: String,
    },
    /// `null` clears the fallback locale.
    SetFallbackLocale {
        #[serde(default)]
        locale: Option<String>,
    },
}

impl Action {
    /// Parse an action payload.
    ///
    /// # Errors
    /// Returns error if the payload is not valid JSON or names an unknown action.
    pub fn from_json_str(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// The `type` tag of the action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetLocale { .. } => "setLocale",
            Self::AddLocale { .. } => "addLocale",
            Self::ReplaceLocale { .. } => "replaceLocale",
            Self::RemoveLocale { .. } => "removeLocale",
            Self::SetFallbackLocale { .. } => "setFallbackLocale",
        }
    }

    /// The locale the action targets, `None` when it clears a pointer.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        match self {
            Self::SetLocale { locale } | Self::SetFallbackLocale { locale } => locale.as_deref(),
            Self::AddLocale { locale, .. }
            | Self::ReplaceLocale { locale, .. }
            | Self::RemoveLocale { locale } => Some(locale),
        }
    }
}
