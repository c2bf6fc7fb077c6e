//! 設定ファイルの読み込み関数

use std::fs;
use std::path::Path;

use super::{
    ConfigError,
    StoreSettings,
};

/// Name of the settings file looked up by [`load_settings`]
pub const SETTINGS_FILE_NAME: &str = ".locale-store.json";

/// 設定を読み込み、バリデーションする
///
/// `dir` 直下の `.locale-store.json` を読む。`dir` が `None` またはファイルが
/// 存在しない場合はデフォルト値を使う。
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
/// - バリデーションエラー
pub fn load_settings(dir: Option<&Path>) -> Result<StoreSettings, ConfigError> {
    let path = dir.map(|dir| dir.join(SETTINGS_FILE_NAME)).filter(|path| path.is_file());

    let settings: StoreSettings = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Reading store settings");
            serde_json::from_str(&fs::read_to_string(&path)?)?
        }
        None => StoreSettings::default(),
    };

    settings.validate().map_err(ConfigError::Invalid)?;
    tracing::debug!(?settings, "Store settings loaded");

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::ArrayElementPolicy;

    fn dir_with_settings(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE_NAME), content).unwrap();
        dir
    }

    /// root が None の場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_dir() {
        let settings = load_settings(None).unwrap();

        assert_eq!(settings, StoreSettings::default());
    }

    /// 設定ファイルの値が使われる
    #[rstest]
    fn test_load_settings_with_file() {
        let dir = dir_with_settings(r#"{"keySeparator": "/", "arrayElements": "reject"}"#);

        let settings = load_settings(Some(dir.path())).unwrap();

        assert_eq!(settings.key_separator, "/");
        assert_eq!(settings.array_elements, ArrayElementPolicy::Reject);
    }

    /// 一部だけ指定した場合は残りがデフォルト値
    #[rstest]
    fn test_load_settings_partial_file() {
        let dir = dir_with_settings(r#"{"keySeparator": "-"}"#);

        let settings = load_settings(Some(dir.path())).unwrap();

        assert_eq!(settings.key_separator, "-");
        assert_eq!(settings.array_elements, ArrayElementPolicy::Warn);
    }

    /// 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_file() {
        let dir = TempDir::new().unwrap();

        let settings = load_settings(Some(dir.path())).unwrap();

        assert_eq!(settings, StoreSettings::default());
    }

    /// JSON パースエラー
    #[rstest]
    fn test_load_settings_invalid_json() {
        let dir = dir_with_settings("invalid json");

        let result = load_settings(Some(dir.path()));

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    /// 無効な設定でエラー
    #[rstest]
    fn test_load_settings_invalid() {
        let dir = dir_with_settings(r#"{"keySeparator": ""}"#);

        let result = load_settings(Some(dir.path()));

        assert!(matches!(result, Err(ConfigError::Invalid(errors)) if errors.len() == 1));
    }
}
