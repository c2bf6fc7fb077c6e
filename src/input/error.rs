use thiserror::Error;

/// Errors raised while converting a JSON document into a translation tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An array holds something other than a string and the reject policy is active
    #[error("Non-string element at index {index} of array '{key}'")]
    NonStringArrayElement {
        /// Dotted path of the array within the document (original casing)
        key: String,
        /// Position of the first offending element
        index: usize,
    },
}
