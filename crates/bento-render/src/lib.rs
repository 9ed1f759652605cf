//! Presentation for Bento widgets and profile pages.
//!
//! Rendering is a read path: [`render_widget`] switches on the widget's
//! content kind and returns a [`PresentationNode`] tree, [`render_profile`]
//! assembles the public page. Neither touches the store.
//!
//! Kinds this build does not know render as a placeholder card showing the
//! title and raw type string.

mod calendar;
mod card;
mod context;
mod heatmap;
mod node;
mod page;
mod renderer;

pub use calendar::{available_weekdays, time_slots, DEFAULT_TIME_SLOTS, WEEKDAY_MARKERS};
pub use card::{card_style, foreground_for};
pub use context::RenderContext;
pub use heatmap::{
    contribution_levels, contribution_weeks, HEATMAP_DAYS, HEATMAP_WEEKS, MAX_LEVEL,
    PREVIEW_WEEKS,
};
pub use node::{escape, Element, PresentationNode};
pub use page::{html_document, render_profile};
pub use renderer::render_widget;
