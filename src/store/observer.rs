//! Change notification for translation updates

use std::any::Any;
use std::panic::{
    AssertUnwindSafe,
    catch_unwind,
};

/// Error an observer may report. The store logs it and carries on.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// What happened to the translations collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TranslationsChange {
    /// Keys were merged into a locale (created if it did not exist).
    Added { locale: String },
    /// A locale's keys were overwritten.
    Replaced { locale: String },
    /// A locale was deleted.
    Removed { locale: String },
}

impl TranslationsChange {
    /// The locale affected by the change.
    #[must_use]
    pub fn locale(&self) -> &str {
        match self {
            Self::Added { locale } | Self::Replaced { locale } | Self::Removed { locale } => locale,
        }
    }
}

/// Receives a notification after every change to the stored translations.
///
/// Called synchronously, after the change is committed. Errors and panics
/// are swallowed by the store: they never reach the caller of the mutating
/// operation, never undo the change and never stop later observers from
/// being notified.
pub trait ChangeObserver: Send {
    /// # Errors
    /// Any error is logged at debug level and discarded.
    fn notify(&mut self, change: &TranslationsChange) -> Result<(), ObserverError>;
}

impl<F> ChangeObserver for F
where
    F: FnMut(&TranslationsChange) -> Result<(), ObserverError> + Send,
{
    fn notify(&mut self, change: &TranslationsChange) -> Result<(), ObserverError> {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, notified in subscription order
#[derive(Default)]
pub(crate) struct Observers {
    /// Id handed to the next subscriber
    next_id: u64,
    /// Subscribed observers
    entries: Vec<(SubscriptionId, Box<dyn ChangeObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn ChangeObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Notify every observer, isolating their failures from the store.
    pub(crate) fn notify(&mut self, change: &TranslationsChange) {
        for (id, observer) in &mut self.entries {
            match catch_unwind(AssertUnwindSafe(|| observer.notify(change))) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::debug!(subscription = id.0, %error, "Change observer failed, ignoring");
                }
                Err(payload) => {
                    tracing::warn!(
                        subscription = id.0,
                        panic = panic_message(payload.as_ref()),
                        "Change observer panicked, ignoring"
                    );
                }
            }
        }
    }
}

/// Best-effort text of a panic payload
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("next_id", &self.next_id)
            .field("subscriptions", &self.entries.iter().map(|(id, _)| id.0).collect::<Vec<_>>())
            .finish()
    }
}
