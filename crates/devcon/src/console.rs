//! The owned console context.
//!
//! One [`Console`] value holds every piece of console state (scrollback,
//! link index, selection, edit line, history, completion, scroll and
//! hover state, modes, and the session log) and is driven explicitly by
//! the host once per input-dispatch cycle. Nothing here is ambient or
//! shared: construct it at startup, pass it around, drop it at shutdown.
//!
//! All methods run synchronously on the caller's tick and always
//! terminate; a reentrancy flag (not a lock) makes a draw issued during a
//! draw a skipped no-op instead of a recursion.

use std::path::{Path, PathBuf};

use tracing::{trace, warn};

use devcon_core::{
    Cell, CellFlags, LinkIndex, LinkSpan, MapMode, Metrics, Offset, ScrollbackBuffer,
    SelectionModel, SelectionOutcome,
};
use devcon_input::{Completion, CompletionSources, EditLine, HistoryRing, TabCompletionEngine};

use crate::command::ConsoleCommand;
use crate::dump;
use crate::host::{ConsoleHost, PointerShape};
use crate::session_log::SessionLog;

/// Visibility / input-capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleMode {
    /// Hidden; no pointer or key handling.
    #[default]
    Closed,
    /// Full console: scrollback, selection, completion.
    Open,
    /// Team chat entry line only.
    ChatTeam,
    /// Public chat entry line only.
    ChatPublic,
}

/// Where a submitted line should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitScope {
    /// The command dispatcher.
    Command,
    /// Team chat.
    ChatTeam,
    /// Public chat.
    ChatPublic,
}

/// A line the user submitted, for the external dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The submitted text.
    pub text: String,
    /// Routing decided by the mode the line was entered in.
    pub scope: SubmitScope,
}

/// Startup sizing and wiring, applied once by [`Console::new`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Initial scrollback columns.
    pub columns: usize,
    /// Scrollback line capacity at the initial width (fixes the cell
    /// budget that reflow redistributes).
    pub scrollback_lines: usize,
    /// History ring depth.
    pub history_depth: usize,
    /// Virtual canvas size the console lays out in.
    pub canvas: (f32, f32),
    /// Cell size in canvas units.
    pub cell: (f32, f32),
    /// Text-area margin in canvas units.
    pub margin: (f32, f32),
    /// Scrollback rows shown when open.
    pub visible_rows: i32,
    /// Session log destination; `None` disables logging.
    pub log_path: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            columns: 78,
            scrollback_lines: 256,
            history_depth: 32,
            canvas: (640.0, 480.0),
            cell: (8.0, 8.0),
            margin: (8.0, 8.0),
            visible_rows: 25,
            log_path: None,
        }
    }
}

/// The interactive console subsystem.
pub struct Console {
    buffer: ScrollbackBuffer,
    links: LinkIndex,
    selection: SelectionModel,
    edit: EditLine,
    history: HistoryRing,
    completion: TabCompletionEngine,
    log: SessionLog,
    /// Printed text not yet terminated by a newline, awaiting log
    /// write-through.
    log_pending: String,
    mode: ConsoleMode,
    /// Lines scrolled back from the live tail; 0 = pinned to newest.
    scroll_back: usize,
    /// Hovered link, as a stable index into `links`.
    hover: Option<usize>,
    /// Last pointer position in window pixels.
    pointer: (f32, f32),
    window: (f32, f32),
    canvas: (f32, f32),
    cell: (f32, f32),
    margin: (f32, f32),
    visible_rows: i32,
    /// Reentrancy guard for `draw`.
    drawing: bool,
}

impl Console {
    /// Build the console from startup configuration.
    ///
    /// A session log that cannot be opened disables logging with a
    /// warning; it never fails construction.
    #[must_use]
    pub fn new(config: ConsoleConfig) -> Self {
        let log = match &config.log_path {
            None => SessionLog::disabled(),
            Some(path) => SessionLog::create(path).unwrap_or_else(|error| {
                warn!(%error, path = %path.display(), "couldn't open session log");
                SessionLog::disabled()
            }),
        };
        Self {
            buffer: ScrollbackBuffer::new(config.columns, config.scrollback_lines),
            links: LinkIndex::new(),
            selection: SelectionModel::new(),
            edit: EditLine::new(),
            history: HistoryRing::new(config.history_depth),
            completion: TabCompletionEngine::new(),
            log,
            log_pending: String::new(),
            mode: ConsoleMode::Closed,
            scroll_back: 0,
            hover: None,
            pointer: (0.0, 0.0),
            window: config.canvas,
            canvas: config.canvas,
            cell: config.cell,
            margin: config.margin,
            visible_rows: config.visible_rows.max(1),
            drawing: false,
        }
    }

    /// Replace the session log (embedding seam for custom sinks).
    pub fn set_session_log(&mut self, log: SessionLog) {
        self.log = log;
    }

    // -----------------------------------------------------------------------
    // State accessors
    // -----------------------------------------------------------------------

    /// The scrollback buffer.
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &ScrollbackBuffer {
        &self.buffer
    }

    /// The link index.
    #[inline]
    #[must_use]
    pub fn links(&self) -> &LinkIndex {
        &self.links
    }

    /// The live edit line.
    #[inline]
    #[must_use]
    pub fn edit_line(&self) -> &EditLine {
        &self.edit
    }

    /// Current visibility mode.
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ConsoleMode {
        self.mode
    }

    /// Lines scrolled back from the live tail.
    #[inline]
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_back
    }

    /// The link currently under the pointer.
    #[must_use]
    pub fn hovered_link(&self) -> Option<&LinkSpan> {
        self.hover.and_then(|i| self.links.get(i))
    }

    /// The completion hint from the last Tab press.
    #[must_use]
    pub fn completion_hint(&self) -> &str {
        self.completion.hint()
    }

    /// Current frame geometry for pointer mapping and drawing.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        Metrics {
            window_w: self.window.0,
            window_h: self.window.1,
            canvas_w: self.canvas.0,
            canvas_h: self.canvas.1,
            cell_w: self.cell.0,
            cell_h: self.cell.1,
            margin_x: self.margin.0,
            margin_y: self.margin.1,
            visible_rows: self.visible_rows,
            visible_cols: self.buffer.width() as i32,
            display_line: self.buffer.current_line() - self.scroll_back as i64,
            scrolled_back: self.scroll_back > 0,
        }
    }

    // -----------------------------------------------------------------------
    // Printing
    // -----------------------------------------------------------------------

    /// Append text to the scrollback (word-wrapped) and the session log.
    pub fn print(&mut self, text: &str) {
        self.print_with_flags(text, CellFlags::empty());
    }

    /// Append text with display flags (high-color emphasis).
    pub fn print_with_flags(&mut self, text: &str, flags: CellFlags) {
        self.log_write(text);
        let before = self.buffer.current_line();
        self.buffer.print(text, flags);
        self.pin_scroll(before);
        self.refresh_hover();
    }

    /// Append link text and register a span over it.
    ///
    /// The span covers exactly the glyphs the text produced, so a wrapped
    /// link stays clickable on every line it crosses.
    pub fn print_link(&mut self, text: &str, target: &str) {
        self.log_write(text);
        let before = self.buffer.current_line();
        let placed = self.buffer.print(text, CellFlags::LINK);
        if let Some((begin, end)) = placed {
            self.links.insert(LinkSpan::new(target, begin, end));
        }
        self.pin_scroll(before);
        self.refresh_hover();
    }

    /// Write-through: completed lines go to the session log as they are
    /// printed, not on shutdown.
    fn log_write(&mut self, text: &str) {
        self.log_pending.push_str(text);
        while let Some(pos) = self.log_pending.find('\n') {
            let line: String = self.log_pending.drain(..=pos).collect();
            self.log.write_line(line.trim_end_matches(['\n', '\r']));
        }
    }

    /// Keep the view stationary while scrolled back: new lines grow the
    /// offset instead of dragging the view to the tail.
    fn pin_scroll(&mut self, before: i64) {
        if self.scroll_back > 0 {
            let added = (self.buffer.current_line() - before).max(0) as usize;
            self.scroll_back = (self.scroll_back + added).min(self.max_scroll());
        }
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    fn max_scroll(&self) -> usize {
        self.buffer
            .total_lines()
            .saturating_sub(self.visible_rows as usize)
    }

    /// Scroll toward older lines.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_back = (self.scroll_back + lines).min(self.max_scroll());
        self.refresh_hover();
    }

    /// Scroll toward the live tail.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
        self.refresh_hover();
    }

    /// Jump to the oldest buffered line.
    pub fn scroll_home(&mut self) {
        self.scroll_back = self.max_scroll();
        self.refresh_hover();
    }

    /// Jump back to the live tail.
    pub fn scroll_end(&mut self) {
        self.scroll_back = 0;
        self.refresh_hover();
    }

    // -----------------------------------------------------------------------
    // Modes
    // -----------------------------------------------------------------------

    /// Toggle the full console open or closed.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ConsoleMode::Open => ConsoleMode::Closed,
            _ => ConsoleMode::Open,
        };
        self.refresh_hover();
    }

    /// Open a chat entry line (team or public). Clears the edit line.
    pub fn open_chat(&mut self, team: bool) {
        self.mode = if team {
            ConsoleMode::ChatTeam
        } else {
            ConsoleMode::ChatPublic
        };
        self.edit.clear();
        self.completion.reset();
        self.refresh_hover();
    }

    /// Close the console or chat entry.
    pub fn close(&mut self) {
        self.mode = ConsoleMode::Closed;
        self.refresh_hover();
    }

    /// Clear the scrollback, its link spans, and the selection.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.links.clear();
        self.selection.clear();
        self.scroll_back = 0;
        self.refresh_hover();
    }

    /// Reflow the scrollback to a new column count.
    ///
    /// Link spans shift by the reflow delta; the selection is dropped
    /// (its offsets have no meaningful mapping onto re-laid-out rows).
    pub fn resize_width(&mut self, columns: usize) {
        let delta = self.buffer.reflow(columns);
        self.links.shift_lines(delta, self.buffer.width());
        self.selection.clear();
        self.scroll_back = self.scroll_back.min(self.max_scroll());
        self.refresh_hover();
    }

    /// Tell the console the window size changed (pointer mapping scale).
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window = (width, height);
        self.refresh_hover();
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Pointer motion, once per dispatch cycle.
    pub fn pointer_moved(&mut self, x: f32, y: f32, host: &mut dyn ConsoleHost) {
        self.pointer = (x, y);
        if self.mode != ConsoleMode::Open {
            return;
        }
        if self.selection.phase().is_pressed() {
            let (at, _) = self.metrics().screen_to_offset(x, y, MapMode::Nearest);
            self.selection.drag_to(at);
        }
        self.refresh_hover();
        host.set_pointer_shape(if self.hover.is_some() {
            PointerShape::Hand
        } else {
            PointerShape::Arrow
        });
    }

    /// Primary button down.
    pub fn button_down(&mut self, x: f32, y: f32) {
        if self.mode != ConsoleMode::Open {
            return;
        }
        self.pointer = (x, y);
        let (at, _) = self.metrics().screen_to_offset(x, y, MapMode::Nearest);
        self.selection.press(at);
        self.refresh_hover();
    }

    /// Primary button up: retains a drag selection, or activates the
    /// hovered link on a plain click.
    pub fn button_up(&mut self, host: &mut dyn ConsoleHost) {
        if self.mode != ConsoleMode::Open {
            return;
        }
        let hovered = self.hover.and_then(|i| self.links.get(i));
        let outcome = self.selection.release(hovered);
        if let SelectionOutcome::LinkActivated(target) = outcome {
            host.open_link(&target);
            host.link_cue();
        }
        self.refresh_hover();
    }

    /// Recompute which link the pointer is over.
    ///
    /// Called internally after every state change that can move text
    /// under the pointer; exposed so hosts can force it after external
    /// changes (e.g. a font swap).
    pub fn refresh_hover(&mut self) {
        if self.mode != ConsoleMode::Open {
            self.hover = None;
            return;
        }
        let m = self.metrics();
        let (at, inside) = m.screen_to_offset(self.pointer.0, self.pointer.1, MapMode::Inside);
        self.hover = if inside {
            self.links.lookup_index(at)
        } else {
            None
        };
    }

    /// Copy the normalized selection to the clipboard, trailing blanks
    /// trimmed per line. Returns whether anything was copied.
    pub fn copy_selection(&mut self, host: &mut dyn ConsoleHost) -> bool {
        let Some((begin, end)) = self.selection.normalize(self.buffer.valid_lines()) else {
            return false;
        };
        let text = self.selection_text(begin, end);
        host.clipboard_write(&text);
        true
    }

    fn selection_text(&self, begin: Offset, end: Offset) -> String {
        let width = self.buffer.width();
        let last_line = if end.col == 0 { end.line - 1 } else { end.line };
        let mut out = String::new();
        for line in begin.line..=last_line {
            if line > begin.line {
                out.push('\n');
            }
            let from = if line == begin.line {
                begin.col.max(0) as usize
            } else {
                0
            };
            let to = if line == end.line {
                end.col as usize
            } else {
                width
            };
            let to = to.min(self.buffer.line_len(line));
            let from = from.min(to);
            out.extend(self.buffer.row(line)[from..to].iter().map(|c| c.glyph));
        }
        out
    }

    // -----------------------------------------------------------------------
    // Keyboard input
    // -----------------------------------------------------------------------

    /// A printable character typed into the edit line.
    pub fn key_char(&mut self, c: char) {
        self.edit.insert_char(c);
        self.completion.reset();
    }

    /// Backspace.
    pub fn key_backspace(&mut self) {
        self.edit.delete_backward();
        self.completion.reset();
    }

    /// Delete.
    pub fn key_delete(&mut self) {
        self.edit.delete_forward();
        self.completion.reset();
    }

    /// Cursor movement.
    pub fn key_left(&mut self) {
        self.edit.move_left();
        self.completion.reset();
    }

    /// Cursor movement.
    pub fn key_right(&mut self) {
        self.edit.move_right();
        self.completion.reset();
    }

    /// Cursor to line start.
    pub fn key_home(&mut self) {
        self.edit.move_home();
        self.completion.reset();
    }

    /// Cursor to line end.
    pub fn key_end(&mut self) {
        self.edit.move_end();
        self.completion.reset();
    }

    /// Page up: scroll toward older lines.
    pub fn key_page_up(&mut self) {
        self.scroll_up(2);
    }

    /// Page down: scroll toward the tail.
    pub fn key_page_down(&mut self) {
        self.scroll_down(2);
    }

    /// History: previous entry.
    pub fn key_up(&mut self) {
        let live = self.edit.text().to_string();
        if let Some(entry) = self.history.up(&live) {
            let text = entry.to_string();
            self.edit.set_text(&text);
        }
        self.completion.reset();
    }

    /// History: next entry, back to the live edit.
    pub fn key_down(&mut self) {
        if let Some(entry) = self.history.down() {
            let text = entry.to_string();
            self.edit.set_text(&text);
        }
        self.completion.reset();
    }

    /// Tab completion; `reverse` cycles backward (modifier held).
    pub fn key_tab(
        &mut self,
        reverse: bool,
        sources: &dyn CompletionSources,
    ) -> Option<Completion> {
        let done = self
            .completion
            .complete(self.edit.text(), self.edit.cursor(), reverse, sources)?;
        self.edit.set_text_and_cursor(&done.line, done.cursor);
        Some(done)
    }

    /// Paste from the clipboard into the edit line (first line only).
    pub fn paste(&mut self, host: &mut dyn ConsoleHost) {
        if let Some(text) = host.clipboard_read() {
            let line = text.lines().next().unwrap_or("");
            self.edit.insert_str(line);
            self.completion.reset();
        }
    }

    /// Submit the edit line.
    ///
    /// Command-mode lines are echoed to the scrollback and recorded in
    /// history; chat lines close the chat entry. Returns the submission
    /// for the external dispatcher, or `None` for an empty line.
    pub fn key_enter(&mut self) -> Option<Submission> {
        let text = self.edit.take();
        self.completion.reset();
        let scope = match self.mode {
            ConsoleMode::ChatTeam => SubmitScope::ChatTeam,
            ConsoleMode::ChatPublic => SubmitScope::ChatPublic,
            _ => SubmitScope::Command,
        };
        match scope {
            SubmitScope::Command => {
                self.history.submit(&text);
                self.print(&format!("> {text}\n"));
            }
            _ => self.mode = ConsoleMode::Closed,
        }
        (!text.trim().is_empty()).then_some(Submission { text, scope })
    }

    // -----------------------------------------------------------------------
    // Commands, dump, draw
    // -----------------------------------------------------------------------

    /// Execute a resolved console command.
    ///
    /// I/O failures are reported through the print/log channel and never
    /// corrupt console state.
    pub fn execute(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Clear => self.clear(),
            ConsoleCommand::Toggle => self.toggle(),
            ConsoleCommand::Dump { path } => match self.dump(&path) {
                Ok(()) => self.print(&format!("dumped console to {}\n", path.display())),
                Err(error) => {
                    warn!(%error, path = %path.display(), "console dump failed");
                    self.print(&format!("couldn't write {}: {error}\n", path.display()));
                }
            },
            ConsoleCommand::MessageMode => self.open_chat(false),
            ConsoleCommand::MessageMode2 => self.open_chat(true),
        }
    }

    /// Dump the scrollback as plain text (high-color bit stripped,
    /// trailing blanks trimmed, leading blank lines skipped).
    pub fn dump(&self, path: &Path) -> std::io::Result<()> {
        dump::dump_to_path(&self.buffer, path)
    }

    /// Paint the console through the host's primitives.
    ///
    /// Guarded against reentry: a draw triggered while a draw is already
    /// running (a print from inside a draw callback asking for a redraw)
    /// is skipped, not recursed.
    pub fn draw(&mut self, host: &mut dyn ConsoleHost) {
        if self.drawing {
            trace!("skipping reentrant console draw");
            return;
        }
        self.drawing = true;
        self.draw_inner(host);
        self.drawing = false;
    }

    fn draw_inner(&self, host: &mut dyn ConsoleHost) {
        if self.mode == ConsoleMode::Closed {
            return;
        }
        let m = self.metrics();
        if self.mode == ConsoleMode::Open {
            let normalized = self.selection.normalize(self.buffer.valid_lines());
            for row in 0..m.visible_rows {
                if m.scrolled_back && row == m.visible_rows - 1 {
                    // "More text below" indicator replaces the bottom row.
                    let mut col = 0;
                    while col < m.visible_cols {
                        host.draw_glyph(col, row, Cell::new('^'));
                        col += 4;
                    }
                    continue;
                }
                let line = m.line_at_row(row);
                if !self.buffer.valid_lines().contains(&line) {
                    continue;
                }
                if let Some((begin, end)) = normalized {
                    let last = if end.col == 0 { end.line - 1 } else { end.line };
                    if (begin.line..=last).contains(&line) {
                        let from = if line == begin.line { begin.col } else { 0 };
                        let to = if line == end.line {
                            end.col
                        } else {
                            m.visible_cols
                        };
                        if to > from {
                            host.fill_rect(from, row, to - from, 1);
                        }
                    }
                }
                let len = self.buffer.line_len(line);
                let cells = self.buffer.row(line);
                for (col, cell) in cells[..len].iter().enumerate() {
                    host.draw_glyph(col as i32, row, *cell);
                }
            }
        }
        // Input line sits below the scrollback rows.
        let input_row = m.visible_rows;
        let prompt = match self.mode {
            ConsoleMode::Open => '>',
            _ => ':',
        };
        host.draw_glyph(0, input_row, Cell::new(prompt));
        for (i, c) in self.edit.text().chars().enumerate() {
            host.draw_glyph(2 + i as i32, input_row, Cell::new(c));
        }
        host.draw_glyph(2 + self.edit.cursor_chars() as i32, input_row, Cell::new('_'));
    }

    #[cfg(test)]
    pub(crate) fn force_drawing(&mut self, drawing: bool) {
        self.drawing = drawing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        glyphs: Vec<(i32, i32, char)>,
        rects: Vec<(i32, i32, i32, i32)>,
        shapes: Vec<PointerShape>,
        clipboard: Option<String>,
        opened: Vec<String>,
        cues: usize,
        paste: Option<String>,
    }

    impl ConsoleHost for Recording {
        fn draw_glyph(&mut self, col: i32, row: i32, cell: Cell) {
            self.glyphs.push((col, row, cell.glyph));
        }
        fn fill_rect(&mut self, col: i32, row: i32, cols: i32, rows: i32) {
            self.rects.push((col, row, cols, rows));
        }
        fn set_pointer_shape(&mut self, shape: PointerShape) {
            self.shapes.push(shape);
        }
        fn clipboard_write(&mut self, text: &str) {
            self.clipboard = Some(text.to_string());
        }
        fn clipboard_read(&mut self) -> Option<String> {
            self.paste.clone()
        }
        fn open_link(&mut self, target: &str) {
            self.opened.push(target.to_string());
        }
        fn link_cue(&mut self) {
            self.cues += 1;
        }
    }

    /// 20x10 buffer, 5 visible rows, 8x8 cells, no margin, window ==
    /// canvas so pixels and canvas units coincide.
    fn console() -> Console {
        Console::new(ConsoleConfig {
            columns: 20,
            scrollback_lines: 10,
            history_depth: 8,
            canvas: (160.0, 48.0),
            cell: (8.0, 8.0),
            margin: (0.0, 0.0),
            visible_rows: 5,
            log_path: None,
        })
    }

    /// Pixel center of a cell, given the console() geometry.
    fn px(col: i32, row: i32) -> (f32, f32) {
        (col as f32 * 8.0 + 4.0, row as f32 * 8.0 + 4.0)
    }

    /// Visible row showing logical `line` (console() geometry, no
    /// scrollback offset).
    fn row_of(console: &Console, line: i64) -> i32 {
        let m = console.metrics();
        (line - m.line_at_row(0)) as i32
    }

    fn line_text(console: &Console, line: i64) -> String {
        let sb = console.buffer();
        sb.row(line)[..sb.line_len(line)]
            .iter()
            .map(|c| c.glyph)
            .collect()
    }

    #[test]
    fn submit_echoes_and_records_history() {
        let mut con = console();
        con.toggle();
        for c in "quit".chars() {
            con.key_char(c);
        }
        let sub = con.key_enter().unwrap();
        assert_eq!(sub.text, "quit");
        assert_eq!(sub.scope, SubmitScope::Command);
        assert_eq!(line_text(&con, 0), "> quit");
        con.key_up();
        assert_eq!(con.edit_line().text(), "quit");
    }

    #[test]
    fn empty_submit_returns_none_but_echoes_prompt() {
        let mut con = console();
        con.toggle();
        assert!(con.key_enter().is_none());
        assert_eq!(line_text(&con, 0), ">");
    }

    #[test]
    fn chat_submission_routes_by_mode_and_closes() {
        let mut con = console();
        con.open_chat(true);
        for c in "go go go".chars() {
            con.key_char(c);
        }
        let sub = con.key_enter().unwrap();
        assert_eq!(sub.scope, SubmitScope::ChatTeam);
        assert_eq!(con.mode(), ConsoleMode::Closed);
        // Chat lines are not echoed into the scrollback.
        assert_eq!(con.buffer().line_len(0), 0);
    }

    #[test]
    fn click_on_link_opens_it_with_cue() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        con.print_link("manual", "open manual");
        // Link sits on line 0; no newline yet, so line 0 is the bottom row.
        let (x, y) = px(2, row_of(&con, 0));
        con.pointer_moved(x, y, &mut host);
        assert_eq!(con.hovered_link().unwrap().target, "open manual");
        assert_eq!(host.shapes.last(), Some(&PointerShape::Hand));
        con.button_down(x, y);
        con.button_up(&mut host);
        assert_eq!(host.opened, ["open manual"]);
        assert_eq!(host.cues, 1);
    }

    #[test]
    fn drag_selects_and_copies_text() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        con.print("hello world\n");
        let row = row_of(&con, 0);
        con.button_down(px(0, row).0, px(0, row).1);
        con.pointer_moved(px(5, row).0, px(5, row).1, &mut host);
        con.button_up(&mut host);
        assert!(con.copy_selection(&mut host));
        assert_eq!(host.clipboard.as_deref(), Some("hello"));
    }

    #[test]
    fn drag_release_does_not_activate_links() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        con.print_link("hello world", "target");
        let row = row_of(&con, 0);
        con.button_down(px(0, row).0, px(0, row).1);
        con.pointer_moved(px(4, row).0, px(4, row).1, &mut host);
        con.button_up(&mut host);
        assert!(host.opened.is_empty());
        assert_eq!(host.cues, 0);
    }

    #[test]
    fn selection_highlight_is_drawn() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        con.print("hello world\n");
        let row = row_of(&con, 0);
        con.button_down(px(0, row).0, px(0, row).1);
        con.pointer_moved(px(5, row).0, px(5, row).1, &mut host);
        con.button_up(&mut host);
        con.draw(&mut host);
        assert!(host.rects.contains(&(0, row, 5, 1)));
    }

    #[test]
    fn reentrant_draw_is_skipped() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        con.print("text\n");
        con.force_drawing(true);
        con.draw(&mut host);
        assert!(host.glyphs.is_empty());
        con.force_drawing(false);
        con.draw(&mut host);
        assert!(!host.glyphs.is_empty());
    }

    #[test]
    fn closed_console_ignores_pointer_input() {
        let mut con = console();
        let mut host = Recording::default();
        con.print_link("x", "t");
        con.pointer_moved(px(0, 4).0, px(0, 4).1, &mut host);
        con.button_down(px(0, 4).0, px(0, 4).1);
        con.button_up(&mut host);
        assert!(con.hovered_link().is_none());
        assert!(host.opened.is_empty());
    }

    #[test]
    fn scroll_clamps_to_buffer_capacity() {
        let mut con = console();
        con.toggle();
        con.scroll_up(1000);
        assert_eq!(con.scroll_offset(), 5); // 10 lines - 5 visible
        assert!(con.metrics().scrolled_back);
        con.scroll_down(1000);
        assert_eq!(con.scroll_offset(), 0);
        con.scroll_home();
        assert_eq!(con.scroll_offset(), 5);
        con.scroll_end();
        assert_eq!(con.scroll_offset(), 0);
    }

    #[test]
    fn printing_while_scrolled_back_pins_the_view() {
        let mut con = console();
        con.toggle();
        for i in 0..8 {
            con.print(&format!("line {i}\n"));
        }
        con.scroll_up(2);
        let shown = con.metrics().display_line;
        con.print("more\n");
        assert_eq!(con.metrics().display_line, shown);
        assert_eq!(con.scroll_offset(), 3);
    }

    #[test]
    fn resize_shifts_link_spans_and_drops_selection() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        con.print_link("docs", "open docs");
        let begin_before = con.links().get(0).unwrap().begin;
        let row = row_of(&con, 0);
        con.button_down(px(0, row).0, px(0, row).1);
        con.pointer_moved(px(3, row).0, px(3, row).1, &mut host);
        con.button_up(&mut host);
        con.resize_width(10);
        let delta = 20 - 1 - 10; // budget 200 cells: 10 lines of 20 -> 20 of 10
        let span = con.links().get(0).unwrap();
        assert_eq!(span.begin.line, begin_before.line + delta);
        assert!(span.begin <= span.end);
        assert!(!con.copy_selection(&mut host));
    }

    #[test]
    fn clear_empties_buffer_links_and_selection() {
        let mut con = console();
        con.toggle();
        con.print_link("x", "t");
        con.print("words\n");
        con.clear();
        assert!(con.links().is_empty());
        for line in con.buffer().valid_lines() {
            assert_eq!(con.buffer().line_len(line), 0);
        }
    }

    #[test]
    fn paste_inserts_first_clipboard_line() {
        let mut con = console();
        let mut host = Recording {
            paste: Some("map e1m1\nrm -rf /".to_string()),
            ..Default::default()
        };
        con.toggle();
        con.paste(&mut host);
        assert_eq!(con.edit_line().text(), "map e1m1");
    }

    #[test]
    fn tab_completion_rewrites_edit_line() {
        struct Pool;
        impl CompletionSources for Pool {
            fn global_names(&self, emit: &mut dyn FnMut(&str, Option<&str>)) {
                emit("quit", Some("cmd"));
                emit("quickload", Some("cmd"));
            }
        }
        let mut con = console();
        con.toggle();
        for c in "quit".chars() {
            con.key_char(c);
        }
        con.key_backspace();
        con.key_backspace(); // "qu"
        let done = con.key_tab(false, &Pool).unwrap();
        assert_eq!(done.matches, 2);
        assert_eq!(con.edit_line().text(), "quickload");
        let done = con.key_tab(false, &Pool).unwrap();
        assert_eq!(done.line, "quit");
        assert_eq!(con.edit_line().text(), "quit");
    }

    #[test]
    fn dump_command_reports_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut con = console();
        con.print("saved text\n");
        con.execute(ConsoleCommand::Dump { path: path.clone() });
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "saved text\n");
        assert!(line_text(&con, 1).starts_with("dumped console to"));

        con.execute(ConsoleCommand::Dump {
            path: "/nonexistent-devcon-dir/out.txt".into(),
        });
        let tail: String = con
            .buffer()
            .valid_lines()
            .map(|l| line_text(&con, l))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(tail.contains("couldn't write"));
    }

    #[test]
    fn session_log_receives_completed_lines_only() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone)]
        struct Shared(Arc<Mutex<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let sink = Shared(Arc::new(Mutex::new(Vec::new())));
        let mut con = console();
        con.set_session_log(SessionLog::from_writer(Box::new(sink.clone())));
        con.print("hello\nworl");
        {
            let bytes = sink.0.lock().unwrap();
            assert_eq!(String::from_utf8_lossy(&bytes), "hello\n");
        }
        con.print("d\n");
        let bytes = sink.0.lock().unwrap();
        assert_eq!(String::from_utf8_lossy(&bytes), "hello\nworld\n");
    }

    #[test]
    fn indicator_row_replaces_bottom_row_when_scrolled() {
        let mut con = console();
        let mut host = Recording::default();
        con.toggle();
        for i in 0..9 {
            con.print(&format!("line {i}\n"));
        }
        con.scroll_up(2);
        con.draw(&mut host);
        // Bottom scrollback row (row 4) shows the indicator glyphs.
        assert!(host.glyphs.contains(&(0, 4, '^')));
        assert!(host.glyphs.contains(&(4, 4, '^')));
    }
}
