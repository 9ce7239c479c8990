//! Console cell: the fundamental unit of the scrollback grid.
//!
//! Each cell stores a single glyph and its display flags. This is
//! intentionally simpler than a full terminal cell: the console renders
//! through a fixed-pitch bitmap font, so one cell is always one column.

use bitflags::bitflags;

bitflags! {
    /// Per-cell display flags, orthogonal to the glyph itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Alternate-palette ("high color") text. Stripped by the
        /// plain-text dump.
        const HIGH_COLOR = 1 << 0;
        /// Cell is covered by a hyperlink span.
        const LINK = 1 << 1;
    }
}

/// A single cell in the scrollback grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The glyph content. A space for blank/erased cells.
    pub glyph: char,
    /// Display flags.
    pub flags: CellFlags,
}

impl Cell {
    /// The blank cell used to erase rows.
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        flags: CellFlags::empty(),
    };

    /// Create a cell with no flags.
    #[inline]
    #[must_use]
    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            flags: CellFlags::empty(),
        }
    }

    /// Create a cell with the given flags.
    #[inline]
    #[must_use]
    pub const fn with_flags(glyph: char, flags: CellFlags) -> Self {
        Self { glyph, flags }
    }

    /// Whether this cell reads as whitespace (used for trailing trims and
    /// word-wrap boundaries).
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.glyph.is_whitespace()
    }

    /// The glyph with all display flags stripped; what a plain-text dump
    /// writes for this cell.
    #[inline]
    #[must_use]
    pub const fn plain(&self) -> char {
        self.glyph
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
