//! Slot geometry: where each widget card sits on the canvas.
//!
//! Two layouts are supported:
//! - free-size flow, where cards keep their pixel size and wrap into rows
//! - fixed grid, where `gridSpan`/`rowSpan` cover whole cells and cards are
//!   auto-placed row-major into the first free area

use bento_core::{GridConfig, PixelSize, Point, Rect, Widget, WidgetId};
use serde::{Deserialize, Serialize};

/// On-canvas bounds of one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Widget occupying the slot
    pub id: WidgetId,
    /// Index in display order
    pub index: usize,
    /// Bounds in editor pixels
    pub rect: Rect,
}

impl Slot {
    /// Create a slot.
    #[must_use]
    pub const fn new(id: WidgetId, index: usize, rect: Rect) -> Self {
        Self { id, index, rect }
    }
}

/// Flow layout for free-size mode. Cards are placed left to right and wrap
/// when the next one would overflow `container_width`; a card wider than the
/// container gets a row of its own.
#[must_use]
pub fn flow_slots(
    widgets: &[Widget],
    default_size: PixelSize,
    container_width: f32,
    gap: f32,
) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(widgets.len());
    let mut cursor = Point::ORIGIN;
    let mut row_height: f32 = 0.0;

    for (index, widget) in widgets.iter().enumerate() {
        let size = widget.size_or(default_size);
        let (width, height) = (size.width as f32, size.height as f32);

        if cursor.x > 0.0 && cursor.x + width > container_width {
            cursor = Point::new(0.0, cursor.y + row_height + gap);
            row_height = 0.0;
        }

        slots.push(Slot::new(
            widget.id.clone(),
            index,
            Rect::new(cursor.x, cursor.y, width, height),
        ));
        cursor.x += width + gap;
        row_height = row_height.max(height);
    }

    slots
}

/// Fixed-grid layout for the `gridSpan`/`rowSpan` compatibility mode.
#[must_use]
pub fn grid_slots(widgets: &[Widget], grid: &GridConfig) -> Vec<Slot> {
    let columns = grid.columns.max(1) as usize;
    let spans: Vec<(usize, usize)> = widgets
        .iter()
        .map(|w| {
            (
                w.grid_span.unwrap_or_default().tracks().min(columns),
                w.row_span.unwrap_or_default().tracks(),
            )
        })
        .collect();
    let pitch = (grid.cell + grid.gap) as f32;

    auto_place(&spans, columns)
        .into_iter()
        .zip(spans)
        .zip(widgets)
        .enumerate()
        .map(|(index, (((row, col), (col_span, row_span)), widget))| {
            Slot::new(
                widget.id.clone(),
                index,
                Rect::new(
                    col as f32 * pitch,
                    row as f32 * pitch,
                    grid.span_length(col_span as u32) as f32,
                    grid.span_length(row_span as u32) as f32,
                ),
            )
        })
        .collect()
}

/// Row-major auto placement of `(col_span, row_span)` items on a grid with
/// `columns` columns. Returns the `(row, col)` of each item.
#[must_use]
pub fn auto_place(spans: &[(usize, usize)], columns: usize) -> Vec<(usize, usize)> {
    let columns = columns.max(1);
    let mut occupied: Vec<Vec<bool>> = Vec::new();
    let mut placements = Vec::with_capacity(spans.len());

    for &(col_span, row_span) in spans {
        let col_span = col_span.clamp(1, columns);
        let row_span = row_span.max(1);
        let (row, col) = find_next_position(&mut occupied, columns, col_span, row_span);

        ensure_rows(&mut occupied, row + row_span, columns);
        for cells in &mut occupied[row..row + row_span] {
            for cell in &mut cells[col..col + col_span] {
                *cell = true;
            }
        }
        placements.push((row, col));
    }

    placements
}

/// Index of the slot containing `point`. When several contain it the one
/// with the nearest center wins; equal distances keep the earlier slot.
#[must_use]
pub fn slot_at(slots: &[Slot], point: Point) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for slot in slots.iter().filter(|s| s.rect.contains_point(&point)) {
        let distance = slot.rect.center().distance(&point);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((slot.index, distance));
        }
    }
    best.map(|(index, _)| index)
}

fn find_next_position(
    occupied: &mut Vec<Vec<bool>>,
    columns: usize,
    col_span: usize,
    row_span: usize,
) -> (usize, usize) {
    let mut row = 0;
    loop {
        ensure_rows(occupied, row + row_span, columns);
        for col in 0..=(columns - col_span) {
            if can_place(occupied, row, col, row_span, col_span) {
                return (row, col);
            }
        }
        row += 1;
    }
}

fn ensure_rows(occupied: &mut Vec<Vec<bool>>, min_rows: usize, columns: usize) {
    while occupied.len() < min_rows {
        occupied.push(vec![false; columns]);
    }
}

fn can_place(
    occupied: &[Vec<bool>],
    row: usize,
    col: usize,
    row_span: usize,
    col_span: usize,
) -> bool {
    occupied[row..row + row_span]
        .iter()
        .all(|cells| cells[col..col + col_span].iter().all(|taken| !taken))
}
