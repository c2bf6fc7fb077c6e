//! Translation store
//!
//! Holds the flattened translations of every loaded locale together with the
//! current and fallback locale pointers. All mutations run to completion
//! synchronously and take `&mut self`; sharing a store between threads needs
//! an external lock around the whole store.
//!
//! Locale pointers are not checked against the loaded locales and may name a
//! locale that has no translations (yet, or any more).

mod action;
mod observer;

use std::collections::hash_map::Entry;
use std::sync::Arc;

use serde_json::Value;

pub use action::Action;
pub use observer::{
    ChangeObserver,
    ObserverError,
    SubscriptionId,
    TranslationsChange,
};
use observer::Observers;

use crate::config::{
    ConfigError,
    StoreSettings,
};
use crate::flatten::flatten_with_separator;
use crate::input::{
    TranslationTree,
    TreeError,
};
use crate::types::{
    FlatMap,
    TranslationValue,
    TranslationsByLocale,
};

/// In-memory translation registry.
///
/// # Examples
/// ```
/// use locale_store::{TranslationStore, TranslationTree, TranslationValue};
///
/// let mut store = TranslationStore::new();
/// store.add_locale("en", &TranslationTree::new().with("A", "1").with("b", "2"));
/// store.add_locale("en", &TranslationTree::new().with("a", "9").with("C", "3"));
///
/// assert_eq!(store.translation("en", "a"), Some(&TranslationValue::from("9")));
/// assert_eq!(store.translation("en", "b"), Some(&TranslationValue::from("2")));
/// assert_eq!(store.translation("en", "c"), Some(&TranslationValue::from("3")));
/// ```
#[derive(Default)]
pub struct TranslationStore {
    /// Current locale
    locale: Option<String>,
    /// Locale consulted by readers when the current one lacks a key
    fallback: Option<String>,
    /// Locale → flattened translations
    translations: Arc<TranslationsByLocale>,
    /// Flattening and JSON conversion settings
    settings: StoreSettings,
    /// Notified after every change to `translations`
    observers: Observers,
}

impl TranslationStore {
    /// Create an empty store with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given settings.
    ///
    /// # Errors
    /// - Validation errors in `settings`
    pub fn with_settings(settings: StoreSettings) -> Result<Self, ConfigError> {
        settings.validate().map_err(ConfigError::Invalid)?;
        Ok(Self { settings, ..Self::default() })
    }

    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Set the current locale. The locale does not need to be loaded.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        tracing::debug!(locale = %locale, "Setting current locale");
        self.locale = Some(locale);
    }

    /// Unset the current locale.
    pub fn clear_locale(&mut self) {
        tracing::debug!("Clearing current locale");
        self.locale = None;
    }

    /// Set the fallback locale. The locale does not need to be loaded.
    pub fn set_fallback_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        tracing::debug!(locale = %locale, "Setting fallback locale");
        self.fallback = Some(locale);
    }

    /// Unset the fallback locale.
    pub fn clear_fallback_locale(&mut self) {
        tracing::debug!("Clearing fallback locale");
        self.fallback = None;
    }

    /// Merge translations into a locale, creating it if needed.
    ///
    /// Keys present in both the stored map and `tree` take the new value;
    /// keys only in the stored map are kept.
    pub fn add_locale(&mut self, locale: impl Into<String>, tree: &TranslationTree) {
        let locale = locale.into();
        let flat = self.flatten(tree);
        let translations = Arc::make_mut(&mut self.translations);

        match translations.entry(locale.clone()) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(locale = %locale, keys = flat.len(), "Merging translations");
                entry.get_mut().extend(flat);
            }
            Entry::Vacant(entry) => {
                tracing::debug!(locale = %locale, keys = flat.len(), "Adding locale");
                entry.insert(flat);
            }
        }

        self.observers.notify(&TranslationsChange::Added { locale });
    }

    /// Overwrite a locale's translations, discarding every previously stored key.
    pub fn replace_locale(&mut self, locale: impl Into<String>, tree: &TranslationTree) {
        let locale = locale.into();
        let flat = self.flatten(tree);
        tracing::debug!(locale = %locale, keys = flat.len(), "Replacing translations");

        Arc::make_mut(&mut self.translations).insert(locale.clone(), flat);

        self.observers.notify(&TranslationsChange::Replaced { locale });
    }

    /// Remove a locale.
    ///
    /// Removing a locale that is not loaded does nothing and notifies no one.
    /// When the removed locale is the current locale, the current locale is
    /// unset. The fallback locale is left as is even if it names the removed
    /// locale.
    ///
    /// The translations map is swapped for a new one, so a [`snapshot`](Self::snapshot)
    /// taken earlier never compares pointer-equal to the result.
    pub fn remove_locale(&mut self, locale: &str) {
        if !self.translations.contains_key(locale) {
            tracing::debug!(locale, "Locale not loaded, nothing to remove");
            return;
        }

        if self.locale.as_deref() == Some(locale) {
            tracing::debug!(locale, "Removed locale was current, clearing current locale");
            self.locale = None;
        }

        let mut remaining = Arc::unwrap_or_clone(std::mem::take(&mut self.translations));
        remaining.remove(locale);
        self.translations = Arc::new(remaining);
        tracing::debug!(locale, "Removed locale");

        self.observers.notify(&TranslationsChange::Removed { locale: locale.to_string() });
    }

    /// [`add_locale`](Self::add_locale) for a JSON document.
    ///
    /// # Errors
    /// Returns error if the document holds a non-string array element under
    /// [`ArrayElementPolicy::Reject`](crate::config::ArrayElementPolicy::Reject); the store is left untouched.
    pub fn add_locale_json(
        &mut self,
        locale: impl Into<String>,
        json: &Value,
    ) -> Result<(), TreeError> {
        let tree = TranslationTree::from_json(json, self.settings.array_elements)?;
        self.add_locale(locale, &tree);
        Ok(())
    }

    /// [`replace_locale`](Self::replace_locale) for a JSON document.
    ///
    /// # Errors
    /// Returns error if the document holds a non-string array element under
    /// [`ArrayElementPolicy::Reject`](crate::config::ArrayElementPolicy::Reject); the store is left untouched.
    pub fn replace_locale_json(
        &mut self,
        locale: impl Into<String>,
        json: &Value,
    ) -> Result<(), TreeError> {
        let tree = TranslationTree::from_json(json, self.settings.array_elements)?;
        self.replace_locale(locale, &tree);
        Ok(())
    }

    /// Apply an [`Action`].
    ///
    /// # Errors
    /// Returns error if the action carries translations rejected by
    /// [`ArrayElementPolicy::Reject`](crate::config::ArrayElementPolicy::Reject); the store is left untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<(), TreeError> {
        tracing::debug!(action = action.name(), locale = ?action.locale(), "Dispatching action");

        match action {
            Action::SetLocale { locale: Some(locale) } => self.set_locale(locale),
            Action::SetLocale { locale: None } => self.clear_locale(),
            Action::SetFallbackLocale { locale: Some(locale) } => self.set_fallback_locale(locale),
            Action::SetFallbackLocale { locale: None } => self.clear_fallback_locale(),
            Action::AddLocale { locale, translations } => {
                self.add_locale_json(locale, &translations)?;
            }
            Action::ReplaceLocale { locale, translations } => {
                self.replace_locale_json(locale, &translations)?;
            }
            Action::RemoveLocale { locale } => self.remove_locale(&locale),
        }

        Ok(())
    }

    /// Register an observer, notified after every change to the translations.
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// [`subscribe`](Self::subscribe) for a closure.
    pub fn subscribe_fn<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&TranslationsChange) -> Result<(), ObserverError> + Send + 'static,
    {
        self.subscribe(observer)
    }

    /// Remove an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    #[must_use]
    pub const fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    #[must_use]
    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// All loaded translations.
    #[must_use]
    pub fn translations(&self) -> &TranslationsByLocale {
        &self.translations
    }

    /// Shared handle to the current translations map.
    ///
    /// Later mutations never alter a snapshot; compare snapshots with
    /// [`Arc::ptr_eq`] to detect changes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<TranslationsByLocale> {
        Arc::clone(&self.translations)
    }

    #[must_use]
    pub fn translations_for(&self, locale: &str) -> Option<&FlatMap> {
        self.translations.get(locale)
    }

    /// Look up a flattened key as stored. No fallback, no key normalization.
    #[must_use]
    pub fn translation(&self, locale: &str, key: &str) -> Option<&TranslationValue> {
        self.translations.get(locale)?.get(key)
    }

    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.translations.contains_key(locale)
    }

    /// Loaded locale codes, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.translations.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Flatten with the configured separator
    fn flatten(&self, tree: &TranslationTree) -> FlatMap {
        flatten_with_separator(tree, &self.settings.key_separator)
    }
}

impl std::fmt::Debug for TranslationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationStore")
            .field("locale", &self.locale)
            .field("fallback", &self.fallback)
            .field("locales", &self.locales())
            .field("settings", &self.settings)
            .field("observers", &self.observers)
            .finish()
    }
}
