use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::error::{ForYouError, ForYouResult};
use crate::layout::{COLUMN_UNIT_WIDTH, COMPACT_MAX_WIDTH, MEDIUM_MAX_WIDTH};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    pub background_color: [u8; 3],
    pub surface_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub font_size: f32,
    pub column_unit_width: f32,
    pub compact_max_width: f32,
    pub medium_max_width: f32,
    pub bottom_inset: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    /// Overrides the directory holding preferences.json and catalog.json.
    pub data_dir: Option<PathBuf>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background_color: [28, 27, 31],
            surface_color: [43, 41, 48],
            accent_color: [208, 188, 255],
            text_color: [230, 225, 229],
            secondary_text_color: [202, 196, 208],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            column_unit_width: COLUMN_UNIT_WIDTH,
            compact_max_width: COMPACT_MAX_WIDTH,
            medium_max_width: MEDIUM_MAX_WIDTH,
            bottom_inset: 16.0,
        }
    }
}

impl AppConfig {
    /// Linux: ~/.config/foryou
    pub fn config_dir() -> ForYouResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ForYouError::NoConfigDir)?;
        Ok(dir.join("foryou"))
    }

    pub fn config_file_path() -> ForYouResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join("config.json"))
    }

    /// Directory for preferences and catalog: the configured override, or the config dir.
    pub fn data_dir(&self) -> ForYouResult<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// Loads the configuration, falling back to (and saving) the defaults.
    pub fn load() -> Self {
        match Self::config_file_path().and_then(|path| Self::load_from_file(&path)) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "failed to load configuration, using defaults");
                let default_config = Self::default();
                if let Err(save_err) = default_config.save() {
                    warn!(error = %save_err, "failed to save default configuration");
                }
                default_config
            }
        }
    }

    pub fn load_from_file(path: &std::path::Path) -> ForYouResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> ForYouResult<()> {
        self.save_to_file(&Self::config_file_path()?)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> ForYouResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
