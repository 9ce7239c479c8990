//! Injected host capabilities.
//!
//! The console never talks to a window system, GPU, or clipboard
//! directly; the embedding application hands it a [`ConsoleHost`] and the
//! console calls these primitives during drawing and input handling.

use devcon_core::Cell;

/// Pointer cursor shapes the console asks the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerShape {
    /// Normal arrow.
    #[default]
    Arrow,
    /// Hand, shown while hovering a link.
    Hand,
}

/// Capabilities the embedding application injects into the console.
pub trait ConsoleHost {
    /// Draw one glyph cell at a (column, row) position of the console
    /// area. Rows below the scrollback area hold the input line.
    fn draw_glyph(&mut self, col: i32, row: i32, cell: Cell);

    /// Fill a cell-aligned rectangle (selection highlight).
    fn fill_rect(&mut self, col: i32, row: i32, cols: i32, rows: i32);

    /// Change the pointer cursor shape.
    fn set_pointer_shape(&mut self, shape: PointerShape);

    /// Put text on the clipboard.
    fn clipboard_write(&mut self, text: &str);

    /// Read text from the clipboard, if any.
    fn clipboard_read(&mut self) -> Option<String>;

    /// Invoke a hotlink's action.
    fn open_link(&mut self, target: &str);

    /// Play the link-activation feedback cue.
    fn link_cue(&mut self);
}

/// Headless host that ignores every capability; useful for tests and for
/// running the console logic without a window.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl ConsoleHost for NullHost {
    fn draw_glyph(&mut self, _col: i32, _row: i32, _cell: Cell) {}
    fn fill_rect(&mut self, _col: i32, _row: i32, _cols: i32, _rows: i32) {}
    fn set_pointer_shape(&mut self, _shape: PointerShape) {}
    fn clipboard_write(&mut self, _text: &str) {}
    fn clipboard_read(&mut self) -> Option<String> {
        None
    }
    fn open_link(&mut self, _target: &str) {}
    fn link_cue(&mut self) {}
}
