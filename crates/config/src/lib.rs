// Configuration loading

pub mod settings;

pub use settings::{config_path, ConfigError, OutputSettings, Settings, SheetSettings, StoreSettings};
