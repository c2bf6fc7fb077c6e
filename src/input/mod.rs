//! Translation data supplied by callers
mod error;
pub mod translation;

pub use error::TreeError;
pub use translation::{
    TranslationNode,
    TranslationTree,
};
