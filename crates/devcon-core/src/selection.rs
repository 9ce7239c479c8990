//! Mouse-driven text selection over buffer offsets.
//!
//! # Invariants
//!
//! 1. The machine is `NotPressed`, `Pressed`, or `Dragging`; the only way
//!    into `Dragging` is pointer motion while `Pressed` with a moved
//!    endpoint.
//! 2. `begin` is the press anchor and never moves during a drag; `end`
//!    follows the pointer and may sit before `begin` (a "reversed"
//!    selection) until normalized on read.
//! 3. Releasing a drag retains the selection; releasing a plain press
//!    either activates the hovered link or does nothing. Side effects
//!    (opening the link, the feedback cue) belong to the host; the model
//!    only reports an outcome.
//!
//! Normalization intersects the ordered range with the currently buffered
//! line range, so a selection whose tail scrolled away quietly shrinks,
//! and one that scrolled away entirely reads as no selection.

use std::ops::Range;

use crate::links::LinkSpan;
use crate::offset::Offset;

/// Pointer-button phase of the selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    /// No button held.
    #[default]
    NotPressed,
    /// Button down, endpoint not yet moved.
    Pressed,
    /// Button down and endpoint moved: an active drag.
    Dragging,
}

impl SelectionPhase {
    /// Whether the button is currently held.
    #[inline]
    #[must_use]
    pub fn is_pressed(self) -> bool {
        !matches!(self, Self::NotPressed)
    }
}

/// What a button release amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Plain release: no drag happened, nothing was hovered.
    Released,
    /// A drag ended; the selection stays visible.
    Retained,
    /// A click landed on a link; the host should invoke the target and
    /// play its feedback cue.
    LinkActivated(String),
}

/// Half-open range intersection over offsets; commutative.
///
/// Returns `None` when the ranges are disjoint (`a.1 <= b.0` or
/// `b.1 <= a.0`) or the intersection is empty.
#[must_use]
pub fn intersect(a: (Offset, Offset), b: (Offset, Offset)) -> Option<(Offset, Offset)> {
    let begin = a.0.max(b.0);
    let end = a.1.min(b.1);
    (begin < end).then_some((begin, end))
}

/// Mouse selection state machine producing a range over buffer offsets.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    phase: SelectionPhase,
    begin: Offset,
    end: Offset,
    /// A selection exists (possibly empty after clamping) and should be
    /// considered on read. Cleared by `clear` and by the next press.
    active: bool,
}

impl SelectionModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Raw (unnormalized) endpoints, in press/drag order.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> (Offset, Offset) {
        (self.begin, self.end)
    }

    /// Primary button down at `at` (mapped with `Nearest`).
    ///
    /// Collapses any previous selection to the new anchor.
    pub fn press(&mut self, at: Offset) {
        self.phase = SelectionPhase::Pressed;
        self.begin = at;
        self.end = at;
        self.active = true;
    }

    /// Pointer motion while the button may be held.
    ///
    /// A no-op unless pressed; moving the endpoint off the anchor starts
    /// the drag.
    pub fn drag_to(&mut self, at: Offset) {
        if !self.phase.is_pressed() {
            return;
        }
        self.end = at;
        if self.end != self.begin {
            self.phase = SelectionPhase::Dragging;
        }
    }

    /// Primary button up, with whatever link the pointer currently hovers.
    pub fn release(&mut self, hovered: Option<&LinkSpan>) -> SelectionOutcome {
        let was = self.phase;
        self.phase = SelectionPhase::NotPressed;
        match was {
            SelectionPhase::Dragging => SelectionOutcome::Retained,
            SelectionPhase::Pressed => {
                self.active = false;
                match hovered {
                    Some(span) => SelectionOutcome::LinkActivated(span.target.clone()),
                    None => SelectionOutcome::Released,
                }
            }
            SelectionPhase::NotPressed => SelectionOutcome::Released,
        }
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The ordered selection clamped to the buffered line range.
    ///
    /// Pure read: calling it twice on unchanged state yields an identical
    /// result. Returns `None` for an empty or fully scrolled-out
    /// selection.
    #[must_use]
    pub fn normalize(&self, valid_lines: Range<i64>) -> Option<(Offset, Offset)> {
        if !self.active {
            return None;
        }
        let (a, b) = if self.begin <= self.end {
            (self.begin, self.end)
        } else {
            (self.end, self.begin)
        };
        intersect(
            (a, b),
            (
                Offset::new(valid_lines.start, 0),
                Offset::new(valid_lines.end, 0),
            ),
        )
    }
}
