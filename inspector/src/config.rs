//! Panel configuration loaded from TOML.

use std::fmt;
use std::path::{Path, PathBuf};

use lilium_core::editor::DEFAULT_MAX_UNDO;
use serde::{Deserialize, Serialize};

/// Number of bits in a layer mask.
pub const MAX_LAYERS: usize = 32;

/// Settings of the action panel.
///
/// Every field is optional in the TOML file:
///
/// ```toml
/// section_title = "Tools"
/// show_signatures = false
/// layers = ["Default", "TransparentFX", "Ignore Raycast", "", "Water", "UI", "", "", "Enemies"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Header drawn above the actions.
    pub section_title: String,
    /// Draw the signature line under each button.
    pub show_signatures: bool,
    /// Vertical space between the host's property listing and the actions.
    pub section_spacing: f32,
    /// Depth of the undo history the host should keep.
    pub max_undo: usize,
    /// Layer names by bit index. Empty names are unnamed layers.
    pub layers: Vec<String>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            section_title: "Actions".into(),
            show_signatures: true,
            section_spacing: 10.0,
            max_undo: DEFAULT_MAX_UNDO,
            layers: default_layers(),
        }
    }
}

fn default_layers() -> Vec<String> {
    ["Default", "TransparentFX", "Ignore Raycast", "", "Water", "UI"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl PanelConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Loads a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })
    }

    /// Loads a config, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded panel config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("No panel config ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Name of layer `bit`, if it is named.
    pub fn layer_name(&self, bit: u32) -> Option<&str> {
        self.layers
            .get(bit as usize)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Named layers as `(bit, name)`, in bit order.
    pub fn named_layers(&self) -> impl Iterator<Item = (u32, &str)> {
        self.layers
            .iter()
            .take(MAX_LAYERS)
            .enumerate()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(bit, name)| (bit as u32, name.as_str()))
    }
}

/// Errors from loading a [`PanelConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The content is not a valid config.
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse {
                path: Some(path),
                message,
            } => write!(f, "failed to parse {}: {message}", path.display()),
            ConfigError::Parse {
                path: None,
                message,
            } => write!(f, "failed to parse config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { .. } => None,
        }
    }
}
