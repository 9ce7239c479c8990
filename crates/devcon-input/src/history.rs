//! Command history: a fixed ring of submitted lines plus the live edit
//! slot.
//!
//! The edit slot is distinct from history storage: navigating away from
//! it snapshots the in-progress line, and arriving back restores it, so
//! live input is never lost to browsing. Navigation skips empty slots and
//! never wraps past the edit slot: `up` stops at the oldest entry, and
//! `down` ends at the edit slot.

/// Circular store of previously submitted lines.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    /// Fixed-size slots; empty string = unused.
    slots: Vec<String>,
    /// Next slot to overwrite.
    head: usize,
    /// `None` = at the edit slot; `Some(d)` = browsing the entry `d`
    /// steps back from the newest submission.
    cursor: Option<usize>,
    /// Snapshot of the live edit taken when navigating away.
    edit: String,
}

impl HistoryRing {
    /// Create a ring with `depth` slots (clamped to at least 1).
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            slots: vec![String::new(); depth.max(1)],
            head: 0,
            cursor: None,
            edit: String::new(),
        }
    }

    /// Number of slots.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Whether the user is currently browsing history (not the edit slot).
    #[inline]
    #[must_use]
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    /// Slot index `back` steps behind the newest submission.
    fn index_back(&self, back: usize) -> usize {
        let n = self.slots.len();
        (self.head + n - 1 - (back % n)) % n
    }

    /// The most recently submitted line, if any.
    #[must_use]
    pub fn newest(&self) -> Option<&str> {
        let slot = &self.slots[self.index_back(0)];
        (!slot.is_empty()).then_some(slot.as_str())
    }

    /// Record a submitted line.
    ///
    /// Empty (or whitespace-only) lines are not recorded, and a line
    /// equal to the immediately preceding entry does not create a second
    /// slot. Submission always returns navigation to the edit slot.
    pub fn submit(&mut self, line: &str) {
        self.cursor = None;
        self.edit.clear();
        if line.trim().is_empty() {
            return;
        }
        if self.newest() == Some(line) {
            return;
        }
        let head = self.head;
        self.slots[head] = line.to_string();
        self.head = (head + 1) % self.slots.len();
    }

    /// Navigate to the next older non-empty entry.
    ///
    /// The first step away from the edit slot snapshots `live`. Returns
    /// the line to display, or `None` when already at the oldest entry
    /// (the caller leaves the line as-is).
    pub fn up(&mut self, live: &str) -> Option<&str> {
        let start = match self.cursor {
            None => 0,
            Some(d) => d + 1,
        };
        for d in start..self.slots.len() {
            let idx = self.index_back(d);
            if !self.slots[idx].is_empty() {
                if self.cursor.is_none() {
                    self.edit = live.to_string();
                }
                self.cursor = Some(d);
                return Some(&self.slots[idx]);
            }
        }
        None
    }

    /// Navigate toward newer entries, ending at the edit slot.
    ///
    /// Returns the line to display: a newer history entry, or the
    /// restored edit snapshot when arriving back at the edit slot.
    /// `None` when already at the edit slot.
    pub fn down(&mut self) -> Option<&str> {
        let from = self.cursor?;
        for d in (0..from).rev() {
            let idx = self.index_back(d);
            if !self.slots[idx].is_empty() {
                self.cursor = Some(d);
                return Some(&self.slots[idx]);
            }
        }
        self.cursor = None;
        Some(&self.edit)
    }
}
