//! The live input line under edit.
//!
//! A UTF-8 string plus a cursor kept on a char boundary. Every operation
//! is total: edits and moves at the ends of the line are no-ops rather
//! than errors.

/// Single-line edit buffer with a char-boundary cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLine {
    text: String,
    /// Byte offset into `text`, always on a char boundary.
    cursor: usize,
}

impl EditLine {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor byte offset.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in chars (for caret rendering).
    #[must_use]
    pub fn cursor_chars(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Whether the line is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole line, cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Replace line and cursor together (completion application).
    ///
    /// The cursor is clamped to the nearest char boundary at or before
    /// the requested offset.
    pub fn set_text_and_cursor(&mut self, text: &str, cursor: usize) {
        self.text = text.to_string();
        let mut cursor = cursor.min(self.text.len());
        while cursor > 0 && !self.text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    /// Take the line for submission, leaving an empty editor.
    #[must_use]
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Erase everything.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Insert a char at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the char before the cursor (backspace).
    pub fn delete_backward(&mut self) {
        if self.cursor > 0 {
            let at = self.prev_boundary();
            self.text.remove(at);
            self.cursor = at;
        }
    }

    /// Delete the char under the cursor (delete).
    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move one char left.
    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    /// Move one char right.
    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    /// Move to line start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move to line end.
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }
}
