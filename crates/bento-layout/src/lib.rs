//! Drag-reorder and snap-to-preset resize for Bento profile layouts.
//!
//! [`LayoutEditor`] tracks one pointer gesture at a time and commits the
//! result through a [`bento_store::ProfileStore`]. Slot geometry comes from
//! [`flow_slots`] (free-size mode) or [`grid_slots`] (fixed-grid mode).

mod editor;
mod error;
mod gesture;
mod preset;
mod slots;

pub use editor::{LayoutEditor, LayoutMode};
pub use error::LayoutError;
pub use gesture::{
    CancelReason, Commit, DragPhase, GestureKind, GestureOutcome, GestureState, PointerTarget,
    Preview,
};
pub use preset::PresetCatalog;
pub use slots::{auto_place, flow_slots, grid_slots, slot_at, Slot};
