//! Editor configuration loaded from YAML.
//!
//! Search order: an explicit path, `$XDG_CONFIG_HOME/bento/config.yaml`,
//! `~/.config/bento/config.yaml`, then built-in defaults. Every field is
//! optional in the file.

use crate::background::Background;
use crate::error::ConfigError;
use crate::widget::PixelSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A named (width, height) pair a resize snaps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePreset {
    /// Display name
    pub name: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl SizePreset {
    /// Create a preset.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Dimensions of this preset.
    #[must_use]
    pub const fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

/// Fixed-grid compatibility layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns
    pub columns: u32,
    /// Cell edge length in pixels
    pub cell: u32,
    /// Gap between cells in pixels
    pub gap: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            cell: 175,
            gap: 16,
        }
    }
}

impl GridConfig {
    /// Pixel length of `tracks` adjacent cells including inner gaps.
    #[must_use]
    pub const fn span_length(&self, tracks: u32) -> u32 {
        if tracks == 0 {
            return 0;
        }
        tracks * self.cell + (tracks - 1) * self.gap
    }
}

/// Layout editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pointer travel in pixels before a press becomes a drag
    pub activation_distance: f32,
    /// Size given to widgets created without one
    pub default_size: PixelSize,
    /// Smallest size a live resize preview may shrink to
    pub min_size: PixelSize,
    /// Snap catalog, in tie-break order
    pub presets: Vec<SizePreset>,
    /// Card background when neither widget nor theme sets one
    pub default_background: Background,
    /// Fixed-grid layout
    pub grid: GridConfig,
    /// Gap between cards in free-size flow layout
    pub flow_gap: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let grid = GridConfig::default();
        let presets = Self::default_presets(&grid);
        Self {
            activation_distance: 5.0,
            default_size: presets[0].size(),
            min_size: PixelSize::new(100, 100),
            presets,
            default_background: Background::default(),
            flow_gap: grid.gap,
            grid,
        }
    }
}

impl EditorConfig {
    /// Built-in presets: one and two cells in each direction.
    #[must_use]
    pub fn default_presets(grid: &GridConfig) -> Vec<SizePreset> {
        let one = grid.span_length(1);
        let two = grid.span_length(2);
        vec![
            SizePreset::new("small", one, one),
            SizePreset::new("wide", two, one),
            SizePreset::new("tall", one, two),
            SizePreset::new("large", two, two),
        ]
    }

    /// Parse and validate YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Candidate config locations, most specific first.
    #[must_use]
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("bento/config.yaml"));
        }

        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/bento/config.yaml"));
        }

        paths
    }

    /// Load `explicit` if given, otherwise the first readable default
    /// location, otherwise the built-in defaults.
    ///
    /// An explicit path that fails to load is an error. Broken files in the
    /// default locations are skipped with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded editor config");
                    return Ok(config);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring editor config");
                }
            }
        }

        Ok(Self::default())
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, message: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.to_string(),
        };

        if !self.activation_distance.is_finite() || self.activation_distance <= 0.0 {
            return Err(invalid("activation_distance", "must be a positive number"));
        }
        if self.presets.is_empty() {
            return Err(invalid("presets", "must not be empty"));
        }
        if let Some(preset) = self.presets.iter().find(|p| p.width == 0 || p.height == 0) {
            return Err(ConfigError::InvalidValue {
                field: "presets".to_string(),
                message: format!("preset '{}' has a zero dimension", preset.name),
            });
        }
        if self.default_size.width == 0 || self.default_size.height == 0 {
            return Err(invalid("default_size", "dimensions must be non-zero"));
        }
        if self.grid.columns == 0 || self.grid.cell == 0 {
            return Err(invalid("grid", "columns and cell must be non-zero"));
        }
        Ok(())
    }

    /// Commented default configuration.
    #[must_use]
    pub fn default_yaml() -> &'static str {
        r##"# bento editor configuration
activation_distance: 5.0
default_size: { width: 175, height: 175 }
min_size: { width: 100, height: 100 }
presets:
  - { name: small, width: 175, height: 175 }
  - { name: wide, width: 366, height: 175 }
  - { name: tall, width: 175, height: 366 }
  - { name: large, width: 366, height: 366 }
default_background: { type: color, value: "#ffffff" }
grid: { columns: 4, cell: 175, gap: 16 }
flow_gap: 16
"##
    }
}
