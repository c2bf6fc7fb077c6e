//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc,
    Mutex,
};

use tracing::field::{
    Field,
    Visit,
};
use tracing::{
    Event,
    Level,
    Subscriber,
};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{
    Context,
    SubscriberExt,
};

use crate::input::TranslationTree;
use crate::store::{
    TranslationStore,
    TranslationsChange,
};

/// テスト用の一階層の `TranslationTree` を作成する
///
/// # Arguments
/// * `pairs` - キーと値のペア（挿入順）
pub(crate) fn tree(pairs: &[(&str, &str)]) -> TranslationTree {
    pairs.iter().copied().collect()
}

/// 変更通知を記録するオブザーバーを登録する
///
/// # Returns
/// 受け取った `TranslationsChange` のログ
pub(crate) fn record_changes(
    store: &mut TranslationStore,
) -> Arc<Mutex<Vec<TranslationsChange>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    store.subscribe_fn(move |change| {
        if let Ok(mut log) = sink.lock() {
            log.push(change.clone());
        }
        Ok(())
    });
    log
}

/// WARN イベント 1 件分のフィールド（フィールド名 → 値）
pub(crate) type WarnFields = HashMap<String, String>;

/// `f` の実行中に発生した WARN イベントを記録する
///
/// # Returns
/// `f` の戻り値と、記録した WARN イベントのフィールド（発生順）
pub(crate) fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<WarnFields>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber =
        tracing_subscriber::registry().with(WarnRecorder { events: Arc::clone(&events) });

    let result = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().map(|events| events.clone()).unwrap_or_default();
    (result, events)
}

/// WARN イベントのフィールドを記録するレイヤー
struct WarnRecorder {
    /// 記録先
    events: Arc<Mutex<Vec<WarnFields>>>,
}

impl<S: Subscriber> Layer<S> for WarnRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        if let Ok(mut events) = self.events.lock() {
            events.push(visitor.fields);
        }
    }
}

/// イベントのフィールドを文字列として集める
#[derive(Default)]
struct FieldVisitor {
    /// フィールド名 → 値
    fields: WarnFields,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields.insert(field.name().to_string(), format!("{value:?}"));
    }
}
