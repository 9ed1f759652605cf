//! The layout editor: turns pointer gestures into store mutations.
//!
//! The editor is inert until [`LayoutEditor::set_editing`] enables it. Only
//! a released drag over a valid target reaches the store; taps, drops
//! outside every slot and aborted gestures leave it untouched.

use crate::error::LayoutError;
use crate::gesture::{
    CancelReason, Commit, DragPhase, GestureKind, GestureOutcome, GestureState, PointerTarget,
    Preview,
};
use crate::preset::PresetCatalog;
use crate::slots::{flow_slots, grid_slots, slot_at, Slot};
use bento_core::{EditorConfig, GridConfig, PixelSize, Point, Size, Widget, WidgetId};
use bento_store::{Applied, ProfileStore};
use tracing::debug;

/// How cards are arranged and what gestures do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Fixed grid driven by `gridSpan`/`rowSpan`; drag reorders only.
    OrderedList,
    /// Pixel-sized cards in a wrapping flow; drag reorders, handles resize.
    #[default]
    FreeSize,
}

/// Gesture-to-store translator for one editing surface.
#[derive(Debug)]
pub struct LayoutEditor {
    mode: LayoutMode,
    editing: bool,
    activation_distance: f32,
    min_size: Size,
    default_size: PixelSize,
    grid: GridConfig,
    flow_gap: f32,
    catalog: PresetCatalog,
    slots: Vec<Slot>,
    container_width: Option<f32>,
    gesture: Option<GestureState>,
}

impl LayoutEditor {
    /// Editor in free-size mode with editing disabled.
    pub fn new(config: &EditorConfig) -> Result<Self, LayoutError> {
        Ok(Self {
            mode: LayoutMode::default(),
            editing: false,
            activation_distance: config.activation_distance,
            min_size: Size::from_pixels(config.min_size.width, config.min_size.height),
            default_size: config.default_size,
            grid: config.grid.clone(),
            flow_gap: config.flow_gap as f32,
            catalog: PresetCatalog::from_config(config)?,
            slots: Vec::new(),
            container_width: None,
            gesture: None,
        })
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Whether gestures are accepted.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Snap catalog.
    #[must_use]
    pub const fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Current slot geometry.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The active gesture, if any.
    #[must_use]
    pub const fn gesture(&self) -> Option<&GestureState> {
        self.gesture.as_ref()
    }

    /// Whether resize handles and drag affordances should be shown.
    #[must_use]
    pub const fn shows_affordances(&self) -> bool {
        self.editing
    }

    /// Enable or disable layout editing. Disabling aborts any gesture.
    pub fn set_editing(&mut self, editing: bool) -> GestureOutcome {
        self.editing = editing;
        if editing {
            GestureOutcome::Ignored
        } else {
            self.cancel()
        }
    }

    /// Switch layout mode, aborting any gesture. Slots must be recomputed
    /// with [`Self::layout`] afterwards.
    pub fn set_mode(&mut self, mode: LayoutMode) -> GestureOutcome {
        if mode == self.mode {
            return GestureOutcome::Ignored;
        }
        self.mode = mode;
        self.cancel()
    }

    /// Replace slot geometry with externally measured bounds, in display
    /// order.
    pub fn sync_slots(&mut self, mut slots: Vec<Slot>) {
        for (index, slot) in slots.iter_mut().enumerate() {
            slot.index = index;
        }
        self.slots = slots;
        self.container_width = None;
    }

    /// Compute slots for `widgets` (display order) in the current mode.
    pub fn layout(&mut self, widgets: &[Widget], container_width: f32) {
        self.slots = match self.mode {
            LayoutMode::OrderedList => grid_slots(widgets, &self.grid),
            LayoutMode::FreeSize => {
                flow_slots(widgets, self.default_size, container_width, self.flow_gap)
            }
        };
        self.container_width = Some(container_width);
    }

    /// Press on a card. Returns whether a gesture started.
    pub fn pointer_down(&mut self, id: &WidgetId, at: Point, target: PointerTarget) -> bool {
        if !self.editing || self.gesture.is_some() {
            return false;
        }
        let Some(slot) = self.slots.iter().find(|s| &s.id == id) else {
            return false;
        };
        let kind = match (target, self.mode) {
            (PointerTarget::Body, _) => GestureKind::Reorder,
            (PointerTarget::ResizeHandle, LayoutMode::FreeSize) => GestureKind::Resize {
                start_size: slot.rect.size(),
            },
            (PointerTarget::ResizeHandle, LayoutMode::OrderedList) => return false,
        };
        debug!(%id, ?kind, "gesture started");
        self.gesture = Some(GestureState::new(id.clone(), kind, at));
        true
    }

    /// Pointer moved. Returns live feedback once the drag is active.
    pub fn pointer_move(&mut self, at: Point) -> Option<Preview> {
        self.track(at);
        let gesture = self.gesture.as_ref()?;
        if !gesture.is_dragging() {
            return None;
        }
        Some(match gesture.kind {
            GestureKind::Reorder => Preview::Reorder {
                id: gesture.widget.clone(),
                offset: gesture.offset(),
                target: gesture.hover_target,
            },
            GestureKind::Resize { start_size } => {
                let size = self.resized(start_size, gesture);
                Preview::Resize {
                    id: gesture.widget.clone(),
                    size,
                    snap: self.catalog.snap(size).size(),
                }
            }
        })
    }

    /// Pointer released. Commits through `store` when the gesture was a
    /// drag onto a valid target.
    pub fn pointer_up(
        &mut self,
        at: Point,
        store: &mut ProfileStore,
    ) -> Result<GestureOutcome, LayoutError> {
        self.track(at);
        let Some(gesture) = self.gesture.take() else {
            return Ok(GestureOutcome::Ignored);
        };
        if !gesture.is_dragging() {
            return Ok(GestureOutcome::Click(gesture.widget));
        }
        if store.widget(&gesture.widget).is_none() {
            return Ok(self.cancelled(&gesture, CancelReason::WidgetMissing));
        }

        let commit = match gesture.kind {
            GestureKind::Reorder => {
                let Some(target) = gesture.hover_target.and_then(|i| self.slots.get(i)) else {
                    return Ok(self.cancelled(&gesture, CancelReason::OutsideTargets));
                };

                // Slots may lag behind the store; order by current ids.
                let mut order = store.ids();
                let Some(to) = order.iter().position(|id| id == &target.id) else {
                    return Ok(self.cancelled(&gesture, CancelReason::WidgetMissing));
                };
                let Some(from) = order.iter().position(|id| id == &gesture.widget) else {
                    return Ok(self.cancelled(&gesture, CancelReason::WidgetMissing));
                };
                if from == to {
                    return Ok(self.cancelled(&gesture, CancelReason::SameSlot));
                }

                let moved = order.remove(from);
                order.insert(to, moved);
                store.reorder_widgets(&order)?;
                Commit::Reordered {
                    id: gesture.widget,
                    from,
                    to,
                }
            }
            GestureKind::Resize { start_size } => {
                let preset = self.catalog.snap(self.resized(start_size, &gesture)).clone();
                match store.resize_widget(&gesture.widget, preset.width, preset.height)? {
                    Applied::Missing => {
                        return Ok(self.cancelled(&gesture, CancelReason::WidgetMissing));
                    }
                    Applied::Changed => Commit::Resized {
                        id: gesture.widget,
                        size: preset.size(),
                        preset: preset.name,
                    },
                }
            }
        };

        debug!(?commit, "gesture committed");
        if let Some(width) = self.container_width {
            self.layout(store.widgets(), width);
        }
        Ok(GestureOutcome::Committed(commit))
    }

    /// Abort the active gesture without touching the store.
    pub fn cancel(&mut self) -> GestureOutcome {
        match self.gesture.take() {
            Some(gesture) => self.cancelled(&gesture, CancelReason::Aborted),
            None => GestureOutcome::Ignored,
        }
    }

    fn cancelled(&self, gesture: &GestureState, reason: CancelReason) -> GestureOutcome {
        debug!(id = %gesture.widget, ?reason, "gesture cancelled");
        GestureOutcome::Cancelled(reason)
    }

    fn resized(&self, start_size: Size, gesture: &GestureState) -> Size {
        let offset = gesture.offset();
        Size::new(start_size.width + offset.x, start_size.height + offset.y).at_least(self.min_size)
    }

    fn track(&mut self, at: Point) {
        let Some(gesture) = &mut self.gesture else {
            return;
        };
        gesture.current_position = at;

        if gesture.phase == DragPhase::Started
            && gesture.start_position.distance(&at) >= self.activation_distance
        {
            gesture.phase = DragPhase::Dragging;
        }

        if gesture.is_dragging() && gesture.kind == GestureKind::Reorder {
            gesture.hover_target = slot_at(&self.slots, at);
            gesture.phase = if gesture.hover_target.is_some() {
                DragPhase::OverTarget
            } else {
                DragPhase::Dragging
            };
        }
    }
}
