//! Hyperlink span index over the scrollback stream.
//!
//! Spans are recorded in print order, and print order is time order, so
//! the list is sorted by `begin` by construction and lookups are a binary
//! search. Spans are immutable once inserted; the only removals are a
//! whole-index [`LinkIndex::clear`] (buffer clear) and the line-delta
//! shift applied after a reflow.

use crate::offset::Offset;

/// An immutable hyperlink span covering `[begin, end]` (inclusive cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    /// Action target, handed to the host when the span is activated.
    pub target: String,
    /// Offset of the first covered cell.
    pub begin: Offset,
    /// Offset of the last covered cell.
    pub end: Offset,
}

impl LinkSpan {
    /// Create a span.
    #[must_use]
    pub fn new(target: impl Into<String>, begin: Offset, end: Offset) -> Self {
        Self {
            target: target.into(),
            begin,
            end,
        }
    }

    /// Whether `offset` falls inside this span.
    #[inline]
    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool {
        self.begin <= offset && offset <= self.end
    }
}

/// Append-only, offset-sorted list of link spans; binary-searchable.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    spans: Vec<LinkSpan>,
}

impl LinkIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span.
    ///
    /// Spans arrive in non-decreasing `begin` order because printing is
    /// the only producer; that ordering is what makes `lookup` a binary
    /// search.
    pub fn insert(&mut self, span: LinkSpan) {
        debug_assert!(span.begin <= span.end, "inverted span");
        debug_assert!(
            self.spans.last().is_none_or(|prev| prev.begin <= span.begin),
            "span inserted out of print order"
        );
        self.spans.push(span);
    }

    /// Find the span covering `offset`, if any. O(log n).
    #[must_use]
    pub fn lookup(&self, offset: Offset) -> Option<&LinkSpan> {
        self.lookup_index(offset).map(|i| &self.spans[i])
    }

    /// Index variant of [`Self::lookup`], for callers that cache hover
    /// state across frames (indices stay stable until `clear`).
    #[must_use]
    pub fn lookup_index(&self, offset: Offset) -> Option<usize> {
        let i = self.spans.partition_point(|s| s.end < offset);
        (i < self.spans.len() && self.spans[i].begin <= offset).then_some(i)
    }

    /// Get a span by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LinkSpan> {
        self.spans.get(index)
    }

    /// Number of recorded spans.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the index is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Drop all spans (buffer clear).
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Shift every span by a reflow line delta and clamp columns to the
    /// new width. Never produces a span with `begin > end`.
    pub fn shift_lines(&mut self, delta: i64, new_width: usize) {
        let max_col = new_width.saturating_sub(1) as i32;
        for span in &mut self.spans {
            span.begin.line += delta;
            span.end.line += delta;
            span.begin.col = span.begin.col.min(max_col);
            span.end.col = span.end.col.min(max_col);
            debug_assert!(span.begin <= span.end);
        }
    }
}
