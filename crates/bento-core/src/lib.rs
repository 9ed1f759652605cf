//! Core types for Bento profile pages.
//!
//! This crate provides the data model shared by the store, layout engine and
//! renderer:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Widget content: [`WidgetKind`], [`WidgetContent`], [`validate_content`]
//! - Widgets and profiles: [`Widget`], [`UserProfile`], [`Theme`]
//! - Backgrounds: [`Background`], [`resolve_background`],
//!   [`resolve_effective_background`]
//! - Media references: [`media`] URL extractors
//! - Editor settings: [`EditorConfig`]

mod background;
mod color;
mod config;
mod content;
mod error;
mod geometry;
pub mod media;
mod profile;
mod widget;

pub use background::{
    resolve_background, resolve_effective_background, Background, BackgroundKind,
    StyleAttributes, GRADIENT_PRESETS,
};
pub use color::{Color, ColorParseError};
pub use config::{EditorConfig, GridConfig, SizePreset};
pub use content::{
    validate_content, CalendarContent, Count, GithubContent, ImageContent, InstagramContent,
    LinkContent, MapContent, QuoteContent, SocialContent, SpotifyContent, TextContent,
    WidgetContent, WidgetKind, YoutubeContent,
};
pub use error::{ConfigError, ContentError};
pub use geometry::{Point, Rect, Size};
pub use profile::{avatar_url, display_order, Theme, UserProfile};
pub use widget::{GridSpan, PixelSize, Widget, WidgetDraft, WidgetId, WidgetPatch};
