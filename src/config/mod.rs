//! Store settings
mod loader;
mod types;

pub use loader::{
    SETTINGS_FILE_NAME,
    load_settings,
};
pub use types::{
    ArrayElementPolicy,
    ConfigError,
    StoreSettings,
    ValidationError,
};
