//! Screen-to-text coordinate mapping.
//!
//! Pointer input arrives in window pixels; the console lives in a virtual
//! canvas of fixed logical units drawn scaled to the window. [`Metrics`]
//! captures one frame's geometry (scale, cell size, margins, scroll) and
//! maps a pixel position to a logical [`Offset`] under two policies:
//!
//! - [`MapMode::Inside`] is strict containment, for hover and click
//!   hit-testing; coordinates outside the text area (or on the scrollback
//!   indicator row) report out-of-bounds.
//! - [`MapMode::Nearest`] clamps to the nearest legal position, for drag
//!   endpoints; one column past end-of-line is legal so a drag can take
//!   the line's trailing edge, and one row above the top maps to the start
//!   of the top line for whole-line sweeps.

use crate::offset::Offset;

/// Mapping policy for [`Metrics::screen_to_offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Strict containment: out-of-area coordinates are rejected.
    Inside,
    /// Clamp to the nearest legal offset; never rejects.
    Nearest,
}

/// One frame's console geometry, recomputed whenever the window, scroll
/// position, or buffer width changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Window size in physical pixels.
    pub window_w: f32,
    /// Window size in physical pixels.
    pub window_h: f32,
    /// Virtual canvas size the console is laid out in.
    pub canvas_w: f32,
    /// Virtual canvas size the console is laid out in.
    pub canvas_h: f32,
    /// Cell size in virtual canvas units.
    pub cell_w: f32,
    /// Cell size in virtual canvas units.
    pub cell_h: f32,
    /// Left margin of the text area, in virtual canvas units.
    pub margin_x: f32,
    /// Top margin of the text area, in virtual canvas units.
    pub margin_y: f32,
    /// Rows of scrollback text shown.
    pub visible_rows: i32,
    /// Columns shown (the buffer width).
    pub visible_cols: i32,
    /// Logical line displayed on the bottom visible row.
    pub display_line: i64,
    /// Scrolled back from the live tail: the bottom row is repurposed as
    /// the "more text below" indicator and stops hit-testing.
    pub scrolled_back: bool,
}

impl Metrics {
    /// Logical line shown on visible row `row` (row 0 at the top).
    #[inline]
    #[must_use]
    pub fn line_at_row(&self, row: i32) -> i64 {
        self.display_line - i64::from(self.visible_rows) + 1 + i64::from(row)
    }

    /// Map a window-pixel position to a logical offset.
    ///
    /// Returns the offset and whether the position was inside the text
    /// area. `Nearest` mode always reports in-bounds; `Inside` mode
    /// computes the offset even when rejecting, so callers can still
    /// diagnose near-misses.
    #[must_use]
    pub fn screen_to_offset(&self, x: f32, y: f32, mode: MapMode) -> (Offset, bool) {
        // Pixel → virtual canvas → cell. Degenerate geometry divides by 1
        // rather than poisoning the result with NaN.
        let vx = x * self.canvas_w / self.window_w.max(1.0);
        let vy = y * self.canvas_h / self.window_h.max(1.0);
        let col = ((vx - self.margin_x) / self.cell_w.max(1.0)).floor() as i32;
        let row = ((vy - self.margin_y) / self.cell_h.max(1.0)).floor() as i32;

        match mode {
            MapMode::Inside => {
                let on_indicator = self.scrolled_back && row == self.visible_rows - 1;
                let in_bounds = (0..self.visible_cols).contains(&col)
                    && (0..self.visible_rows).contains(&row)
                    && !on_indicator;
                (Offset::new(self.line_at_row(row), col), in_bounds)
            }
            MapMode::Nearest => {
                let row = row.clamp(-1, self.visible_rows);
                if row == -1 {
                    // Above the top edge: snap to the start of the line
                    // below, which makes sweeping out whole lines easy.
                    (Offset::new(self.line_at_row(0), 0), true)
                } else {
                    // col == visible_cols (one past the last column) is
                    // legal so a drag can include end-of-line.
                    let col = col.clamp(0, self.visible_cols);
                    (Offset::new(self.line_at_row(row), col), true)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 800x600 window over a 400x300 canvas: every canvas unit is two
    /// pixels. 8x8 cells, one-cell margins, 10 rows of 20 columns.
    fn metrics() -> Metrics {
        Metrics {
            window_w: 800.0,
            window_h: 600.0,
            canvas_w: 400.0,
            canvas_h: 300.0,
            cell_w: 8.0,
            cell_h: 8.0,
            margin_x: 8.0,
            margin_y: 8.0,
            visible_rows: 10,
            visible_cols: 20,
            display_line: 42,
            scrolled_back: false,
        }
    }

    fn px_of_cell(m: &Metrics, col: i32, row: i32) -> (f32, f32) {
        // Center of the cell, back-projected to pixels.
        let vx = m.margin_x + (col as f32 + 0.5) * m.cell_w;
        let vy = m.margin_y + (row as f32 + 0.5) * m.cell_h;
        (vx * m.window_w / m.canvas_w, vy * m.window_h / m.canvas_h)
    }

    #[test]
    fn inside_maps_cell_centers() {
        let m = metrics();
        let (x, y) = px_of_cell(&m, 0, 0);
        let (off, ok) = m.screen_to_offset(x, y, MapMode::Inside);
        assert!(ok);
        // Top row shows display_line - visible_rows + 1.
        assert_eq!(off, Offset::new(33, 0));

        let (x, y) = px_of_cell(&m, 19, 9);
        let (off, ok) = m.screen_to_offset(x, y, MapMode::Inside);
        assert!(ok);
        assert_eq!(off, Offset::new(42, 19));
    }

    #[test]
    fn inside_rejects_margins_and_outside() {
        let m = metrics();
        let (_, ok) = m.screen_to_offset(1.0, 1.0, MapMode::Inside);
        assert!(!ok);
        let (x, y) = px_of_cell(&m, 20, 5);
        assert!(!m.screen_to_offset(x, y, MapMode::Inside).1);
        let (x, y) = px_of_cell(&m, 5, 10);
        assert!(!m.screen_to_offset(x, y, MapMode::Inside).1);
    }

    #[test]
    fn inside_rejects_indicator_row_when_scrolled_back() {
        let mut m = metrics();
        let (x, y) = px_of_cell(&m, 4, 9);
        assert!(m.screen_to_offset(x, y, MapMode::Inside).1);
        m.scrolled_back = true;
        assert!(!m.screen_to_offset(x, y, MapMode::Inside).1);
        // Rows above the indicator still hit-test.
        let (x, y) = px_of_cell(&m, 4, 8);
        assert!(m.screen_to_offset(x, y, MapMode::Inside).1);
    }

    #[test]
    fn nearest_clamps_column_to_one_past_end() {
        let m = metrics();
        let (x, y) = px_of_cell(&m, 25, 5);
        let (off, ok) = m.screen_to_offset(x, y, MapMode::Nearest);
        assert!(ok);
        assert_eq!(off.col, 20); // one past the last column
        let (x, y) = px_of_cell(&m, -3, 5);
        assert_eq!(m.screen_to_offset(x, y, MapMode::Nearest).0.col, 0);
    }

    #[test]
    fn nearest_remaps_row_above_top_to_line_start() {
        let m = metrics();
        let (x, _) = px_of_cell(&m, 7, 0);
        let (off, ok) = m.screen_to_offset(x, 0.0, MapMode::Nearest);
        assert!(ok);
        assert_eq!(off, Offset::new(m.line_at_row(0), 0));
    }

    #[test]
    fn nearest_clamps_row_below_bottom() {
        let m = metrics();
        let (x, _) = px_of_cell(&m, 3, 0);
        let (off, _) = m.screen_to_offset(x, 5000.0, MapMode::Nearest);
        assert_eq!(off.line, m.line_at_row(m.visible_rows));
    }

    #[test]
    fn degenerate_window_does_not_produce_nan() {
        let mut m = metrics();
        m.window_w = 0.0;
        m.window_h = 0.0;
        let (off, _) = m.screen_to_offset(100.0, 100.0, MapMode::Nearest);
        assert!(off.col >= 0);
    }
}
