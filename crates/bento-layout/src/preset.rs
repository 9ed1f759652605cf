//! Snap-to-preset resizing.

use crate::error::LayoutError;
use bento_core::{EditorConfig, Size, SizePreset};

/// Non-empty, ordered catalog of sizes a resize may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCatalog {
    presets: Vec<SizePreset>,
}

impl PresetCatalog {
    /// Catalog from presets in tie-break order.
    pub fn new(presets: Vec<SizePreset>) -> Result<Self, LayoutError> {
        if presets.is_empty() {
            return Err(LayoutError::EmptyCatalog);
        }
        Ok(Self { presets })
    }

    /// Catalog configured for the editor.
    pub fn from_config(config: &EditorConfig) -> Result<Self, LayoutError> {
        Self::new(config.presets.clone())
    }

    /// Presets in catalog order.
    #[must_use]
    pub fn presets(&self) -> &[SizePreset] {
        &self.presets
    }

    /// Preset minimising `|dw| + |dh|` against `raw`. Ties go to the
    /// earliest preset in the catalog.
    #[must_use]
    pub fn snap(&self, raw: Size) -> &SizePreset {
        let distance = |p: &SizePreset| {
            (p.width as f32 - raw.width).abs() + (p.height as f32 - raw.height).abs()
        };
        self.presets
            .iter()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .expect("catalog is never empty")
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self {
            presets: EditorConfig::default().presets,
        }
    }
}
