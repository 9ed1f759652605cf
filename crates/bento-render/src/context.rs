//! Render settings shared by every card on a page.

use bento_core::{Background, EditorConfig, Theme};

/// How a widget is being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Compact presentation used in editor thumbnails and pickers
    pub preview: bool,
    /// Layout editing is enabled
    pub editing: bool,
    /// Profile theme inherited by cards without their own background
    pub theme: Option<Theme>,
    /// Card background when neither widget nor theme sets one
    pub default_background: Background,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::public()
    }
}

impl RenderContext {
    /// Read-only public page.
    #[must_use]
    pub fn public() -> Self {
        Self {
            preview: false,
            editing: false,
            theme: None,
            default_background: Background::default(),
        }
    }

    /// Layout editor with affordances.
    #[must_use]
    pub fn editor() -> Self {
        Self {
            editing: true,
            ..Self::public()
        }
    }

    /// Compact preview.
    #[must_use]
    pub fn preview() -> Self {
        Self {
            preview: true,
            ..Self::public()
        }
    }

    /// Inherit from `theme`.
    #[must_use]
    pub fn with_theme(mut self, theme: Option<Theme>) -> Self {
        self.theme = theme;
        self
    }

    /// Use the editor configuration's default background.
    #[must_use]
    pub fn with_config(mut self, config: &EditorConfig) -> Self {
        self.default_background = config.default_background.clone();
        self
    }

    /// Edit, delete and resize controls are shown only while editing a
    /// full-size card.
    #[must_use]
    pub const fn shows_affordances(&self) -> bool {
        self.editing && !self.preview
    }
}
