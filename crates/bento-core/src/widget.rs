//! Widgets: the content units placed on a profile page.

use crate::background::Background;
use crate::content::{WidgetContent, WidgetKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Opaque widget identifier, stable across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Wrap an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Column or row multiplier of the fixed-grid layout.
///
/// Persisted as `1` or `2`; any other number reads as [`GridSpan::Single`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum GridSpan {
    /// One track
    #[default]
    Single,
    /// Two tracks
    Double,
}

impl GridSpan {
    /// Number of tracks covered.
    #[must_use]
    pub const fn tracks(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

impl From<u64> for GridSpan {
    fn from(n: u64) -> Self {
        if n == 2 {
            Self::Double
        } else {
            Self::Single
        }
    }
}

impl From<GridSpan> for u64 {
    fn from(span: GridSpan) -> Self {
        span.tracks() as Self
    }
}

/// Integer pixel dimensions of a widget card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PixelSize {
    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single content unit on a profile.
///
/// `content` always matches the kind it reports; there is no separate
/// discriminant field that could drift from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WidgetRecord", into = "WidgetRecord")]
pub struct Widget {
    /// Stable identifier
    pub id: WidgetId,
    /// Optional display label
    pub title: Option<String>,
    /// Kind-specific payload
    pub content: WidgetContent,
    /// Card background override
    pub background: Option<Background>,
    /// Render order, contiguous from 0 once the store owns the widget
    pub position: Option<u32>,
    /// Free-size width
    pub width: Option<u32>,
    /// Free-size height
    pub height: Option<u32>,
    /// Fixed-grid column span
    pub grid_span: Option<GridSpan>,
    /// Fixed-grid row span
    pub row_span: Option<GridSpan>,
}

impl Widget {
    /// Widget with the given id and content and no layout data.
    pub fn new(id: WidgetId, content: impl Into<WidgetContent>) -> Self {
        Self {
            id,
            title: None,
            content: content.into(),
            background: None,
            position: None,
            width: None,
            height: None,
            grid_span: None,
            row_span: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the position.
    #[must_use]
    pub const fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the free-size dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the background override.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Kind, or `None` when the persisted type is not recognised.
    #[must_use]
    pub const fn kind(&self) -> Option<WidgetKind> {
        self.content.kind()
    }

    /// Persisted `type` string.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.content.type_name()
    }

    /// Dimensions, filling absent ones from `default`.
    #[must_use]
    pub fn size_or(&self, default: PixelSize) -> PixelSize {
        PixelSize::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }
}

/// Persisted JSON mirror of [`Widget`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WidgetRecord {
    #[serde(default = "WidgetId::generate")]
    id: WidgetId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    content: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grid_span: Option<GridSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row_span: Option<GridSpan>,
}

impl From<WidgetRecord> for Widget {
    fn from(record: WidgetRecord) -> Self {
        Self {
            content: WidgetContent::coerce(&record.kind, record.content),
            id: record.id,
            title: record.title.filter(|t| !t.is_empty()),
            background: record.background,
            position: record.position,
            width: record.width,
            height: record.height,
            grid_span: record.grid_span,
            row_span: record.row_span,
        }
    }
}

impl From<Widget> for WidgetRecord {
    fn from(widget: Widget) -> Self {
        Self {
            kind: widget.type_name().to_string(),
            content: widget.content.to_value(),
            id: widget.id,
            title: widget.title,
            background: widget.background,
            position: widget.position,
            width: widget.width,
            height: widget.height,
            grid_span: widget.grid_span,
            row_span: widget.row_span,
        }
    }
}

/// A widget as handed over by a creation form: everything except the id
/// and position, which only the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetDraft {
    /// Optional display label
    pub title: Option<String>,
    /// Validated payload
    pub content: WidgetContent,
    /// Card background override
    pub background: Option<Background>,
    /// Free-size width
    pub width: Option<u32>,
    /// Free-size height
    pub height: Option<u32>,
    /// Fixed-grid column span
    pub grid_span: Option<GridSpan>,
    /// Fixed-grid row span
    pub row_span: Option<GridSpan>,
}

impl WidgetDraft {
    /// Draft with content only.
    pub fn new(content: impl Into<WidgetContent>) -> Self {
        Self {
            title: None,
            content: content.into(),
            background: None,
            width: None,
            height: None,
            grid_span: None,
            row_span: None,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the background override.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Set explicit dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Turn the draft into a widget with the given identity.
    #[must_use]
    pub fn into_widget(self, id: WidgetId, position: u32) -> Widget {
        Widget {
            id,
            title: self.title,
            content: self.content,
            background: self.background,
            position: Some(position),
            width: self.width,
            height: self.height,
            grid_span: self.grid_span,
            row_span: self.row_span,
        }
    }
}

/// Partial update of a widget. `None` leaves a field untouched; the nested
/// options of `title` and `background` allow clearing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetPatch {
    /// New title, or `Some(None)` to clear it
    pub title: Option<Option<String>>,
    /// Replacement content
    pub content: Option<WidgetContent>,
    /// New background, or `Some(None)` to inherit the theme again
    pub background: Option<Option<Background>>,
    /// New width
    pub width: Option<u32>,
    /// New height
    pub height: Option<u32>,
    /// New column span
    pub grid_span: Option<GridSpan>,
    /// New row span
    pub row_span: Option<GridSpan>,
}

impl WidgetPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    /// Replace the content.
    #[must_use]
    pub fn content(mut self, content: impl Into<WidgetContent>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set or clear the background override.
    #[must_use]
    pub fn background(mut self, background: Option<Background>) -> Self {
        self.background = Some(background);
        self
    }

    /// Set the spans used by the fixed grid.
    #[must_use]
    pub const fn spans(mut self, grid_span: GridSpan, row_span: GridSpan) -> Self {
        self.grid_span = Some(grid_span);
        self.row_span = Some(row_span);
        self
    }

    /// Whether applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.background.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.grid_span.is_none()
            && self.row_span.is_none()
    }

    /// Merge into `widget`. Id and position are never touched.
    pub fn apply_to(self, widget: &mut Widget) {
        if let Some(title) = self.title {
            widget.title = title;
        }
        if let Some(content) = self.content {
            widget.content = content;
        }
        if let Some(background) = self.background {
            widget.background = background;
        }
        if let Some(width) = self.width {
            widget.width = Some(width);
        }
        if let Some(height) = self.height {
            widget.height = Some(height);
        }
        if let Some(span) = self.grid_span {
            widget.grid_span = Some(span);
        }
        if let Some(span) = self.row_span {
            widget.row_span = Some(span);
        }
    }
}
