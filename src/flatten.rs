//! Nested tree → single-depth key map

use crate::input::{
    TranslationNode,
    TranslationTree,
};
use crate::types::{
    FlatMap,
    TranslationValue,
};

/// Separator used by [`flatten`].
pub const DEFAULT_KEY_SEPARATOR: &str = ".";

/// Flatten a translation tree into a dot-separated key map.
///
/// Every key segment is lower-cased. String lists are stored as one value.
/// When two entries end up with the same key, the later one wins.
///
/// # Examples
/// ```
/// use locale_store::{TranslationTree, TranslationValue, flatten};
///
/// let tree = TranslationTree::new()
///     .with("Greeting", TranslationTree::new().with("Hello", "Hi"))
///     .with("Items", vec!["a", "b"]);
///
/// let flattened = flatten(&tree);
/// assert_eq!(flattened.get("greeting.hello"), Some(&TranslationValue::from("Hi")));
/// assert_eq!(flattened.get("items"), Some(&TranslationValue::from(vec!["a", "b"])));
/// ```
#[must_use]
pub fn flatten(tree: &TranslationTree) -> FlatMap {
    flatten_with_separator(tree, DEFAULT_KEY_SEPARATOR)
}

/// [`flatten`] with a custom separator between key segments.
#[must_use]
pub fn flatten_with_separator(tree: &TranslationTree, separator: &str) -> FlatMap {
    let mut result = FlatMap::new();
    flatten_tree(tree, separator, None, &mut result);
    result
}

/// Recursive step of [`flatten_with_separator`]
fn flatten_tree(
    tree: &TranslationTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut FlatMap,
) {
    for (key, node) in tree.entries() {
        let key = key.to_lowercase();
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));

        match node {
            TranslationNode::Tree(child) => {
                flatten_tree(child, separator, Some(&full_key), result);
            }
            TranslationNode::List(items) => {
                result.insert(full_key, TranslationValue::List(items.clone()));
            }
            TranslationNode::Text(text) => {
                result.insert(full_key, TranslationValue::Text(text.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn text(value: &str) -> TranslationValue {
        TranslationValue::from(value)
    }

    #[googletest::test]
    fn test_flatten_single_level_only_lowercases_keys() {
        let tree = TranslationTree::new().with("Hello", "Hello").with("goodbye", "Goodbye");

        let result = flatten(&tree);

        expect_that!(result.get("hello"), some(eq(&text("Hello"))));
        expect_that!(result.get("goodbye"), some(eq(&text("Goodbye"))));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_nested_normalizes_keys() {
        let tree = TranslationTree::new().with("Greeting", TranslationTree::new().with("Hello", "Hi"));

        let result = flatten(&tree);

        expect_that!(result.get("greeting.hello"), some(eq(&text("Hi"))));
        expect_that!(result.len(), eq(1));
    }

    #[googletest::test]
    fn test_flatten_deep_nested() {
        let tree = TranslationTree::new().with(
            "A",
            TranslationTree::new().with("B", TranslationTree::new().with("C", "Deep value")),
        );

        let result = flatten(&tree);

        expect_that!(result.get("a.b.c"), some(eq(&text("Deep value"))));
        expect_that!(result.len(), eq(1));
    }

    #[googletest::test]
    fn test_flatten_array_passthrough() {
        let tree = TranslationTree::new()
            .with("Items", vec!["a", "b"])
            .with("Menu", TranslationTree::new().with("Entries", vec!["x"]));

        let result = flatten(&tree);

        expect_that!(result.get("items"), some(eq(&TranslationValue::from(vec!["a", "b"]))));
        expect_that!(result.get("menu.entries"), some(eq(&TranslationValue::from(vec!["x"]))));
        expect_that!(result.contains_key("items[0]"), eq(false));
        expect_that!(result.len(), eq(2));
    }

    #[googletest::test]
    fn test_flatten_empty_subtree_produces_no_keys() {
        let tree = TranslationTree::new().with("empty", TranslationTree::new()).with("kept", "yes");

        let result = flatten(&tree);

        expect_that!(result.contains_key("empty"), eq(false));
        expect_that!(result.get("kept"), some(eq(&text("yes"))));
        expect_that!(result.len(), eq(1));
    }

    #[googletest::test]
    fn test_flatten_keys_with_dots_are_kept_whole() {
        let tree = TranslationTree::new()
            .with("Hoge.Fuga", TranslationTree::new().with("Piyo", "Hello"));

        let result = flatten(&tree);

        expect_that!(result.get("hoge.fuga.piyo"), some(eq(&text("Hello"))));
    }

    #[rstest]
    // Keys differing only by case
    #[case(TranslationTree::new().with("Title", "first").with("title", "second"), "title", "second")]
    #[case(TranslationTree::new().with("title", "first").with("TITLE", "second"), "title", "second")]
    // A dotted key colliding with a nested path
    #[case(
        TranslationTree::new()
            .with("a.b", "first")
            .with("a", TranslationTree::new().with("b", "second")),
        "a.b",
        "second"
    )]
    #[case(
        TranslationTree::new()
            .with("a", TranslationTree::new().with("b", "first"))
            .with("A.B", "second"),
        "a.b",
        "second"
    )]
    fn test_flatten_collision_last_seen_wins(
        #[case] tree: TranslationTree,
        #[case] key: &str,
        #[case] expected: &str,
    ) {
        let result = flatten(&tree);

        assert_eq!(result.get(key), Some(&text(expected)));
        assert_eq!(result.len(), 1);
    }

    #[googletest::test]
    fn test_flatten_custom_separator() {
        let tree = TranslationTree::new()
            .with("Common", TranslationTree::new().with("Hello", "Hello"));

        let result = flatten_with_separator(&tree, "_");

        expect_that!(result.get("common_hello"), some(eq(&text("Hello"))));
    }

    #[googletest::test]
    fn test_flatten_is_deterministic() {
        let tree = TranslationTree::new()
            .with("Greeting", TranslationTree::new().with("Hello", "Hi").with("Bye", "Bye"))
            .with("Items", vec!["a"]);

        assert_eq!(flatten(&tree), flatten(&tree));
    }
}
