mod consts;
mod logging;
mod settings;

pub use logging::init_logger;
pub use settings::{AppConfig, FileSettingsStore, JsonFileSettingsStore, Settings, SettingsStore};
