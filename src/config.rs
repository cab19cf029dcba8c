use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::menu::MenuTable;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Top-level application configuration loaded from file + environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingSection,
    pub menu: MenuSection,
    pub vision: VisionSection,
}

impl AppConfig {
    /// Load configuration from disk and environment.
    pub fn load() -> Result<Self> {
        let config_path = env::var("HANSIK_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(&config_path)
    }

    /// Load configuration from `config_path` (if it exists) and `HANSIK__*` variables.
    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut builder = config::Config::builder();

        if config_path.exists() {
            builder = builder.add_source(config::File::from(PathBuf::from(config_path)));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("HANSIK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build()?;
        let mut config: Self = settings.try_deserialize()?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Build the menu table named by `menu.path`, or the built-in week.
    pub fn menu_table(&self) -> Result<MenuTable> {
        match &self.menu.path {
            Some(path) if !path.trim().is_empty() => MenuTable::from_json_file(path.trim())
                .with_context(|| format!("failed to load menu table from {}", path)),
            _ => Ok(MenuTable::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MenuSection {
    /// JSON file holding the weekly table
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisionSection {
    pub endpoint: String,
    pub max_results: Option<u32>,
}

impl Default for VisionSection {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            max_results: None,
        }
    }
}
