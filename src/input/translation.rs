//! Translation tree input definitions

use serde_json::Value;

use super::error::TreeError;
use crate::config::ArrayElementPolicy;

/// A single value inside a [`TranslationTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// A translated string.
    Text(String),
    /// A list of strings, stored as one value and never flattened further.
    List(Vec<String>),
    /// A nested group of keys.
    Tree(TranslationTree),
}

/// Nested translation data as supplied by the caller.
///
/// Entries keep their insertion order and their original key casing. The same
/// key may appear more than once; flattening resolves duplicates last-seen-wins.
///
/// # Examples
/// ```
/// use locale_store::TranslationTree;
///
/// let tree = TranslationTree::new()
///     .with("Greeting", TranslationTree::new().with("Hello", "Hi"))
///     .with("Items", vec!["a", "b"]);
///
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
    /// Key/node pairs in insertion order
    entries: Vec<(String, TranslationNode)>,
}

impl TranslationTree {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, node: impl Into<TranslationNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Appends an entry. An existing entry with the same key is kept.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<TranslationNode>) {
        self.entries.push((key.into(), node.into()));
    }

    /// Iterates over the entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TranslationNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a tree from a JSON document.
    ///
    /// - Strings become [`TranslationNode::Text`], objects become nested trees.
    /// - `null` members become empty trees and therefore produce no keys.
    /// - Numbers and booleans are kept as their JSON text (`42`, `true`).
    /// - Arrays of strings become [`TranslationNode::List`]. An array holding
    ///   anything else is handled according to `policy`: `Warn` logs a warning
    ///   and keeps the offending elements as JSON text, `Reject` fails.
    ///
    /// An array root is keyed by element index (`"0"`, `"1"`, ...). A `null`
    /// root is an empty tree, and so is a string, number or boolean root,
    /// which is logged as a warning.
    ///
    /// # Errors
    /// - A non-string array element is found under [`ArrayElementPolicy::Reject`]
    pub fn from_json(json: &Value, policy: ArrayElementPolicy) -> Result<Self, TreeError> {
        match json {
            Value::Object(map) => tree_from_members(map.iter(), None, policy),
            Value::Array(items) => tree_from_members(
                items.iter().enumerate().map(|(index, item)| (index.to_string(), item)),
                None,
                policy,
            ),
            Value::Null => Ok(Self::new()),
            Value::String(_) | Value::Bool(_) | Value::Number(_) => {
                tracing::warn!(
                    root = %json,
                    "Translation root is not an object or array, ignoring it"
                );
                Ok(Self::new())
            }
        }
    }
}

/// Convert one level of `(key, value)` members; `prefix` is the dotted path used in diagnostics
fn tree_from_members<'a, K>(
    members: impl Iterator<Item = (K, &'a Value)>,
    prefix: Option<&str>,
    policy: ArrayElementPolicy,
) -> Result<TranslationTree, TreeError>
where
    K: AsRef<str>,
{
    let mut tree = TranslationTree::new();

    for (key, value) in members {
        let key = key.as_ref();
        let path = prefix.map_or_else(|| key.to_string(), |p| format!("{p}.{key}"));
        let node = match value {
            Value::String(text) => TranslationNode::Text(text.clone()),
            Value::Object(child) => {
                TranslationNode::Tree(tree_from_members(child.iter(), Some(&path), policy)?)
            }
            Value::Array(items) => TranslationNode::List(list_from_array(items, &path, policy)?),
            Value::Null => TranslationNode::Tree(TranslationTree::new()),
            Value::Bool(_) | Value::Number(_) => TranslationNode::Text(value.to_string()),
        };
        tree.insert(key, node);
    }

    Ok(tree)
}

/// Convert a JSON array, applying `policy` to non-string elements
fn list_from_array(
    items: &[Value],
    path: &str,
    policy: ArrayElementPolicy,
) -> Result<Vec<String>, TreeError> {
    if let Some(index) = items.iter().position(|item| !item.is_string()) {
        match policy {
            ArrayElementPolicy::Reject => {
                return Err(TreeError::NonStringArrayElement { key: path.to_string(), index });
            }
            ArrayElementPolicy::Warn => {
                tracing::warn!(
                    key = path,
                    index,
                    "Only arrays of strings are fully supported, keeping non-string elements as JSON text"
                );
            }
        }
    }

    Ok(items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect())
}

impl From<&str> for TranslationNode {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TranslationNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for TranslationNode {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for TranslationNode {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<TranslationTree> for TranslationNode {
    fn from(tree: TranslationTree) -> Self {
        Self::Tree(tree)
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationTree
where
    K: Into<String>,
    V: Into<TranslationNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, node) in iter {
            tree.insert(key, node);
        }
        tree
    }
}
