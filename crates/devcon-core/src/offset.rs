//! Logical addressing into the scrollback stream.
//!
//! An [`Offset`] names a `(line, column)` position in the logically
//! unbounded line stream. Line numbers increase monotonically as text is
//! printed and are never reused; the scrollback buffer maps them onto its
//! fixed physical storage with wraparound. Offsets order lexicographically
//! by `(line, col)`, which gives hit-testing and selection a single shared
//! total order.

/// A logical `(line, column)` address into the scrollback stream.
///
/// `line` is signed: a shrinking reflow re-bases the stream by a fixed
/// delta and can push old content to negative line numbers. `col` counts
/// columns from the left edge; selection endpoints may use `col == width`
/// (one past the last column) to include end-of-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset {
    /// Logical line number.
    pub line: i64,
    /// Column within the line.
    pub col: i32,
}

impl Offset {
    /// Create an offset.
    #[inline]
    #[must_use]
    pub const fn new(line: i64, col: i32) -> Self {
        Self { line, col }
    }
}
