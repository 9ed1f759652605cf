//! Pointer gesture state.
//!
//! A gesture moves `Started -> Dragging <-> OverTarget` and ends as a
//! click, a commit or a cancellation. Travel below the activation distance
//! never leaves `Started`.

use bento_core::{PixelSize, Point, Size, WidgetId};

/// What part of a card the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Card body: picks the card up for reordering
    Body,
    /// Resize handle: free-size mode only
    ResizeHandle,
}

/// Current phase of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pressed, not yet past the activation distance
    Started,
    /// Dragging with no valid target under the pointer
    Dragging,
    /// Dragging over a valid drop target
    OverTarget,
}

/// What the gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureKind {
    /// Pick-up and drop into another slot
    Reorder,
    /// Drag of the bottom-right resize handle
    Resize {
        /// Card size when the press began
        start_size: Size,
    },
}

/// An in-progress gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    /// Widget being manipulated
    pub widget: WidgetId,
    /// Reorder or resize
    pub kind: GestureKind,
    /// Current phase
    pub phase: DragPhase,
    /// Pointer position at press
    pub start_position: Point,
    /// Latest pointer position
    pub current_position: Point,
    /// Slot index under the pointer, reorder only
    pub hover_target: Option<usize>,
}

impl GestureState {
    /// Fresh gesture at `position`.
    #[must_use]
    pub const fn new(widget: WidgetId, kind: GestureKind, position: Point) -> Self {
        Self {
            widget,
            kind,
            phase: DragPhase::Started,
            start_position: position,
            current_position: position,
            hover_target: None,
        }
    }

    /// Pointer travel since the press.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.current_position - self.start_position
    }

    /// Whether the activation distance has been passed.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging | DragPhase::OverTarget)
    }
}

/// Live feedback while dragging.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Card follows the pointer; `target` is the slot it would land in.
    Reorder {
        /// Dragged widget
        id: WidgetId,
        /// Translation to apply to the card
        offset: Point,
        /// Slot under the pointer
        target: Option<usize>,
    },
    /// Card shows the raw size; `snap` is what release would commit.
    Resize {
        /// Resized widget
        id: WidgetId,
        /// Raw size, clamped to the minimum
        size: Size,
        /// Preset the release would snap to
        snap: PixelSize,
    },
}

/// A change handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Widget moved from one display index to another.
    Reordered {
        /// Moved widget
        id: WidgetId,
        /// Old index
        from: usize,
        /// New index
        to: usize,
    },
    /// Widget snapped to a preset size.
    Resized {
        /// Resized widget
        id: WidgetId,
        /// Preset name
        preset: String,
        /// Committed dimensions
        size: PixelSize,
    },
}

/// Why a gesture ended without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Released outside every slot
    OutsideTargets,
    /// Released over the card's own slot
    SameSlot,
    /// Aborted by the caller, a mode switch or leaving edit mode
    Aborted,
    /// The widget disappeared while it was being dragged
    WidgetMissing,
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No gesture was active, or the editor is inert.
    Ignored,
    /// Released before the activation distance: a tap, not a drag.
    Click(WidgetId),
    /// The store applied a change.
    Committed(Commit),
    /// Nothing was changed.
    Cancelled(CancelReason),
}
