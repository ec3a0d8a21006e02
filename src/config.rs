use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::file_list::LayoutPolicy;
use crate::rename_engine::RenameConfig;

pub const DEFAULT_CONFIG_FILE: &str = "batch-rename.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pattern: String,
    pub start_number: u32,
    pub pad_width: Option<usize>,
    pub sanitize: bool,
    pub max_visible_rows: usize,
    pub min_panel_height: u16,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            start_number: 1,
            pad_width: None,
            sanitize: false,
            max_visible_rows: 30,
            min_panel_height: 10,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Explicit path if given, else the default file when present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visible_rows == 0 {
            return Err(ConfigError::Invalid(
                "max_visible_rows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn rename_config(&self) -> RenameConfig {
        RenameConfig {
            pattern: self.pattern.clone(),
            start_number: self.start_number,
            pad_width: self.pad_width,
            sanitize: self.sanitize,
        }
    }

    pub fn layout_policy(&self) -> LayoutPolicy {
        LayoutPolicy::new(self.max_visible_rows, self.min_panel_height)
    }
}
