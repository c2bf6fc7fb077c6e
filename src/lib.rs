//! locale-store
//!
//! ロケールごとの翻訳データを保持するインメモリストア。
//! ネストした翻訳ツリーを小文字のドット区切りキーに平坦化して格納し、
//! 変更のたびに登録されたオブザーバーへ通知する。

pub mod config;
pub mod flatten;
pub mod input;
pub mod store;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use config::{
    ArrayElementPolicy,
    StoreSettings,
};
pub use flatten::{
    flatten,
    flatten_with_separator,
};
pub use input::{
    TranslationNode,
    TranslationTree,
    TreeError,
};
pub use store::{
    Action,
    ChangeObserver,
    ObserverError,
    SubscriptionId,
    TranslationStore,
    TranslationsChange,
};
pub use types::{
    FlatMap,
    TranslationValue,
    TranslationsByLocale,
};
