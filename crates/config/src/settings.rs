// Application settings
// Loaded from ~/.config/stockcheck/config.toml

use serde::{Deserialize, Serialize};
use stockcheck_store::StoreConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for config loading.
#[derive(Debug)]
pub enum ConfigError {
    /// File exists but could not be read
    Read { path: PathBuf, message: String },
    /// File is not valid TOML or has wrong field types
    Parse { path: PathBuf, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "cannot read config {}: {}", path.display(), message)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "invalid config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the store records live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub project_id: Option<String>,
    pub database: String,
    pub collection: String,
    /// Field holding the store's display name
    pub name_field: String,
    /// Field holding the recorded code list
    pub codes_field: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            project_id: Some(store.project_id).filter(|p| !p.is_empty()),
            database: store.database,
            collection: store.collection,
            name_field: store.name_field,
            codes_field: store.codes_field,
            api_key: store.api_key,
            base_url: store.base_url,
            timeout_secs: store.timeout_secs,
        }
    }
}

impl StoreSettings {
    /// Client configuration for these settings. An empty API key counts as none.
    pub fn to_store_config(&self) -> StoreConfig {
        StoreConfig {
            project_id: self.project_id.clone().unwrap_or_default(),
            database: self.database.clone(),
            collection: self.collection.clone(),
            name_field: self.name_field.clone(),
            codes_field: self.codes_field.clone(),
            api_key: self.api_key.clone().filter(|k| !k.is_empty()),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Count sheet layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetSettings {
    /// Header name, column letter, or 1-indexed number
    pub code_column: String,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            code_column: "C".to_string(),
        }
    }
}

/// Result workbook naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub file: String,
    pub surplus_sheet: String,
    pub missing_sheet: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file: "resultado_conferencia.xlsx".to_string(),
            surplus_sheet: "Sobrando".to_string(),
            missing_sheet: "Faltando".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub sheet: SheetSettings,
    pub output: OutputSettings,
}

/// Default config file location.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockcheck")
        .join("config.toml")
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// TOML rendering with the API key masked.
    pub fn to_redacted_toml(&self) -> Result<String, String> {
        let mut shown = self.clone();
        if let Some(ref key) = shown.store.api_key {
            shown.store.api_key = Some(redact(key));
        }
        toml::to_string_pretty(&shown).map_err(|e| e.to_string())
    }
}

/// Keep the last four characters of a secret.
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
